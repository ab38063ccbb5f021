//! Plain-text and JSON rendering.
//!
//! Renderers return `String`s; only `main` writes to stdout/stderr.

use std::fmt::Write as _;

use chrono::NaiveDate;
use fabulous_client::datetime::days_left;
use fabulous_client::{DnsRecord, DomainInfo, DomainSummary, RegistrarError};
use serde::Serialize;
use serde_json::json;

use crate::portfolio::Summary;

const RULE_WIDTH: usize = 60;
const VALUE_WIDTH: usize = 40;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `{"success": true, "message": ...}` for write commands.
pub fn success_json(message: &str) -> anyhow::Result<String> {
    to_json(&json!({ "success": true, "message": message }))
}

/// Error report for `--json`. Registrar errors keep their structured form.
pub fn error_json(err: &anyhow::Error) -> String {
    let value = match err.downcast_ref::<RegistrarError>() {
        Some(registrar) => json!({ "success": false, "error": registrar }),
        None => json!({ "success": false, "error": { "kind": "Cli", "message": err.to_string() } }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| err.to_string())
}

// ============ Tables ============

fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().copied(), &widths);
    let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, underline.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let joined = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", joined.trim_end());
}

fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

/// Domain table, truncated to `limit` rows with a trailing note.
pub fn domains_table(domains: &[DomainSummary], limit: usize, today: NaiveDate) -> String {
    let rows: Vec<Vec<String>> = domains
        .iter()
        .take(limit)
        .map(|d| {
            let left = d
                .expiry_date
                .as_deref()
                .and_then(|raw| days_left(raw, today));
            vec![
                dash(d.name.as_deref()),
                dash(d.status.as_deref()),
                dash(d.expiry_date.as_deref()),
                left.map_or_else(|| "-".to_string(), |n| n.to_string()),
            ]
        })
        .collect();

    let mut out = table(&["Domain", "Status", "Expires", "Days Left"], &rows);
    if domains.len() > limit {
        let _ = write!(
            out,
            "\nShowing {limit} of {} domains (use --limit to show more)\n",
            domains.len()
        );
    }
    out
}

pub fn records_table(records: &[DnsRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                dash(r.record_type.as_deref()),
                dash(r.name.as_deref()),
                truncate(r.value.as_deref().unwrap_or("-"), VALUE_WIDTH),
                r.ttl.map_or_else(|| "-".to_string(), |t| t.to_string()),
                r.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
            ]
        })
        .collect();
    table(&["Type", "Name", "Value", "TTL", "Priority"], &rows)
}

// ============ Detail views ============

fn labelled(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<15} {value}");
}

fn toggle(value: Option<bool>, on: &str, off: &str) -> String {
    match value {
        Some(true) => on.to_string(),
        Some(false) => off.to_string(),
        None => "-".to_string(),
    }
}

pub fn domain_info(domain: &str, info: &DomainInfo) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n  Domain Information: {domain}\n{rule}");
    labelled(&mut out, "Status", info.status.as_deref().unwrap_or("Active"));
    labelled(&mut out, "Created", &dash(info.creation_date.as_deref()));
    labelled(&mut out, "Expires", &dash(info.expiry_date.as_deref()));
    labelled(&mut out, "Auto-Renew", &toggle(info.auto_renew, "Enabled", "Disabled"));
    labelled(&mut out, "Domain Lock", &toggle(info.locked, "Locked", "Unlocked"));
    labelled(
        &mut out,
        "WHOIS Privacy",
        &toggle(info.whois_privacy, "Enabled", "Disabled"),
    );
    if let Some(nameservers) = info.nameservers.as_deref().filter(|ns| !ns.is_empty()) {
        out.push_str("\nNameservers:\n");
        out.push_str(&numbered(nameservers));
    }
    out
}

pub fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .fold(String::new(), |mut out, (i, item)| {
            let _ = writeln!(out, "  {}. {item}", i + 1);
            out
        })
}

pub fn summary(summary: &Summary) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n  Portfolio Summary\n{rule}");
    let _ = writeln!(out, "Total Domains: {}\n", summary.total);
    out.push_str("Domains by Expiry Year:\n");
    for (year, count) in &summary.by_expiry_year {
        let _ = writeln!(out, "  {year}: {count}");
    }
    out.push_str("\nExpiring Soon:\n");
    let _ = writeln!(out, "  Next 30 days: {}", summary.expiring_30_days);
    let _ = writeln!(out, "  Next 90 days: {}", summary.expiring_90_days);
    out
}
