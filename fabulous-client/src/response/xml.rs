//! Small XPath-like lookups over a `roxmltree` DOM.
//!
//! The registrar's documents are matched by a handful of path shapes:
//! `//name` (any descendant), `//parent/name` (descendant whose direct
//! parent chain matches) and `child` / `child/grandchild` relative to a
//! node. Element names are compared case-sensitively.

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{RegistrarError, Result};

/// Parse a raw body into a DOM, mapping failures to [`RegistrarError::Parse`].
pub(crate) fn parse_document(xml: &str) -> Result<Document<'_>> {
    if xml.trim().is_empty() {
        return Err(RegistrarError::Parse {
            detail: "empty response body".to_string(),
        });
    }
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, options).map_err(|e| RegistrarError::Parse {
        detail: e.to_string(),
    })
}

fn is_element_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// `//a/b/c`: every `c` whose parent is `b` whose parent is `a`,
/// in document order.
pub(crate) fn find_all<'a, 'i>(root: Node<'a, 'i>, path: &[&str]) -> Vec<Node<'a, 'i>> {
    let Some((last, ancestors)) = path.split_last() else {
        return Vec::new();
    };
    root.descendants()
        .filter(|n| is_element_named(n, last))
        .filter(|n| parent_chain_matches(*n, ancestors))
        .collect()
}

/// First match of [`find_all`].
pub(crate) fn find_first<'a, 'i>(root: Node<'a, 'i>, path: &[&str]) -> Option<Node<'a, 'i>> {
    let (last, ancestors) = path.split_last()?;
    root.descendants()
        .find(|n| is_element_named(n, last) && parent_chain_matches(*n, ancestors))
}

fn parent_chain_matches(node: Node<'_, '_>, ancestors: &[&str]) -> bool {
    let mut current = node;
    for name in ancestors.iter().rev() {
        match current.parent_element() {
            Some(parent) if parent.tag_name().name() == *name => current = parent,
            _ => return false,
        }
    }
    true
}

/// First element child named `name`.
pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|c| is_element_named(c, name))
}

/// `a/b` relative to `node`: every `b` child of every `a` child.
pub(crate) fn children_at<'a, 'i>(
    node: Node<'a, 'i>,
    parent: &str,
    name: &str,
) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|c| is_element_named(c, parent))
        .flat_map(|p| p.children().filter(|c| is_element_named(c, name)))
        .collect()
}

/// Concatenated text of all descendant text nodes.
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

/// Text of the first child named `name`, if that child exists.
pub(crate) fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).map(text_content)
}

/// Text of the first `//path` match, if any.
pub(crate) fn find_text(root: Node<'_, '_>, path: &[&str]) -> Option<String> {
    find_first(root, path).map(text_content)
}

/// Leading-integer parse: optional whitespace and sign, then digits.
///
/// Trailing garbage is ignored (`"3600s"` → 3600); text without leading
/// digits yields `None`.
pub(crate) fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// Integer value of the first child named `name`.
pub(crate) fn child_int(node: Node<'_, '_>, name: &str) -> Option<i64> {
    child_text(node, name).as_deref().and_then(parse_int)
}

/// `Some(text == expected)` when the child exists, `None` otherwise.
pub(crate) fn child_flag(node: Node<'_, '_>, name: &str, expected: &str) -> Option<bool> {
    child_text(node, name).map(|t| t.trim() == expected)
}
