//! Pagination metadata detection.

use roxmltree::Node;

use super::xml::{find_all, find_first, find_text, parse_int, text_content};
use crate::types::PaginationInfo;

/// Detect pagination in either the counter format (`pagecount` + `page`)
/// or the result-count format (`results[@count]` + row count).
pub(crate) fn detect(root: Node<'_, '_>) -> Option<PaginationInfo> {
    if let Some(pagecount) = find_first(root, &["pagecount"]) {
        let page_count = to_page(parse_int(&text_content(pagecount))).unwrap_or(0);
        let current_page = page_element(root).unwrap_or(1);
        return Some(PaginationInfo {
            current_page,
            page_count,
            has_more: page_count > current_page,
        });
    }

    let results = root
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "results" && n.has_attribute("count"))?;
    let total = results
        .attribute("count")
        .and_then(parse_int)
        .and_then(|v| u64::try_from(v).ok())
        .unwrap_or(0);
    let shown = find_all(root, &["results", "result"]).len() as u64;

    let (page_count, has_more) = if shown == 0 {
        (1, false)
    } else {
        (total.div_ceil(shown).max(1), total > shown)
    };

    Some(PaginationInfo {
        current_page: echoed_page(root),
        page_count: u32::try_from(page_count).unwrap_or(u32::MAX),
        has_more,
    })
}

/// `//page`, if present and numeric.
fn page_element(root: Node<'_, '_>) -> Option<u32> {
    find_text(root, &["page"]).and_then(|page| to_page(parse_int(&page)))
}

/// Result-count replies carry no `page`; the request echo stands in.
/// Only reported, never used to decide `has_more`.
fn echoed_page(root: Node<'_, '_>) -> u32 {
    if let Some(page) = page_element(root) {
        return page;
    }
    find_all(root, &["request", "params", "param"])
        .into_iter()
        .find(|p| p.attribute("name") == Some("page"))
        .and_then(|p| to_page(parse_int(&text_content(p))))
        .unwrap_or(1)
}

fn to_page(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}
