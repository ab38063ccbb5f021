//! Expiry-date helpers
//!
//! The registrar does not promise a date format: the old format sends
//! `2024-12-31`, the newer one sometimes a full timestamp. Parsing is
//! best-effort and never fails the response parse; records keep the raw
//! string and callers opt into interpretation here.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an expiry-date string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS`.
/// Returns `None` for anything else.
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Whole days from `today` until `expiry` (negative once expired).
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Days left before a raw expiry string, if it parses.
pub fn days_left(raw: &str, today: NaiveDate) -> Option<i64> {
    parse_expiry_date(raw).map(|expiry| days_until(expiry, today))
}
