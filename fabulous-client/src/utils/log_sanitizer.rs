//! Log sanitization utilities
//!
//! Keeps credentials out of debug logs and stops large XML bodies
//! (full domain portfolios, TXT payloads) from flooding them.

/// Maximum number of bytes of a response body included in log output.
const TRUNCATE_LIMIT: usize = 512;

/// Placeholder written instead of secret parameter values.
const REDACTED: &str = "[REDACTED]";

/// Parameter names whose values never reach the log.
const SECRET_PARAMS: &[&str] = &["password", "authCode"];

/// Truncate a response body for safe logging.
///
/// Bodies within the limit are returned unchanged; longer ones are cut on a
/// char boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut end = TRUNCATE_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Render query parameters as a URL query string, redacting secrets.
pub fn redacted_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            let value = if SECRET_PARAMS.contains(&key) {
                REDACTED.to_string()
            } else {
                urlencoding::encode(&value).into_owned()
            };
            format!("{}={value}", urlencoding::encode(key))
        })
        .collect::<Vec<_>>()
        .join("&")
}
