//! Utility modules.

/// Loose expiry-date parsing for registrar date strings.
pub mod datetime;

/// Log sanitization: body truncation and credential redaction.
pub mod log_sanitizer;
