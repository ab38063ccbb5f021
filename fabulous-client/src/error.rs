use serde::Serialize;
use thiserror::Error;

/// Message used for the fixed execution-time quota error (status code 689).
pub const RATE_LIMIT_MESSAGE: &str =
    "Execution time exhausted (300 seconds per 24 hours limit reached)";

/// Status code the API returns once the daily execution-time quota is spent.
pub const RATE_LIMIT_STATUS: i64 = 689;

/// Unified error type for all registrar operations.
///
/// Remote failures are classified by the numeric status code carried in the
/// response document; transport failures are classified by the shape of the
/// underlying HTTP error. Every variant is serializable for structured error
/// reporting (the CLI emits them as JSON with `--json`).
///
/// | Status code | Variant |
/// |-------------|---------|
/// | `300..=399` | [`Authentication`](Self::Authentication) |
/// | `400..=499` | [`Request`](Self::Request) |
/// | `500..=599` | [`Response`](Self::Response) |
/// | `689`       | [`RateLimited`](Self::RateLimited) |
/// | other / absent | [`Unknown`](Self::Unknown) |
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum RegistrarError {
    /// The client configuration is incomplete (e.g. missing credentials).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credentials were rejected or have expired.
    #[error("Authentication failed: {message} (code: {code})")]
    Authentication {
        /// Remote status code.
        code: i64,
        /// Status message from the response, or a default.
        message: String,
    },

    /// The request was malformed or rejected, or the transport failed to
    /// deliver it. Transport failures carry no status code.
    #[error("{}", request_display(.code, .message))]
    Request {
        /// Remote status code, absent for transport-level failures.
        code: Option<i64>,
        /// Error details.
        message: String,
    },

    /// The registrar reported a server-side failure.
    #[error("Server error: {message} (code: {code})")]
    Response {
        /// Remote status code.
        code: i64,
        /// Status message from the response, or a default.
        message: String,
    },

    /// The daily execution-time quota is exhausted.
    #[error("{message}")]
    RateLimited {
        /// Always [`RATE_LIMIT_MESSAGE`].
        message: String,
    },

    /// The HTTP request timed out (connect or total timeout).
    #[error("Request timed out: {detail}")]
    Timeout {
        /// Error details from the transport.
        detail: String,
    },

    /// The response body could not be parsed as XML.
    #[error("Parse error: {detail}")]
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// A non-success response whose status code fits no known class,
    /// including responses without any status code.
    #[error("{}", unknown_display(.code, .message))]
    Unknown {
        /// Raw status code, if the document carried a numeric one.
        code: Option<i64>,
        /// Raw status message, if any.
        message: Option<String>,
    },
}

fn request_display(code: &Option<i64>, message: &str) -> String {
    match code {
        Some(code) => format!("Request error: {message} (code: {code})"),
        None => format!("Request failed: {message}"),
    }
}

fn unknown_display(code: &Option<i64>, message: &Option<String>) -> String {
    let code = code.map_or_else(|| "none".to_string(), |c| c.to_string());
    format!(
        "Unknown error: {} (code: {code})",
        message.as_deref().unwrap_or("")
    )
}

impl RegistrarError {
    /// Classify a non-success status code into an error variant.
    ///
    /// `message` is the document's status message; each class falls back
    /// to its own default text when the document carried none.
    pub fn from_status(code: Option<i64>, message: Option<String>) -> Self {
        match code {
            Some(code @ 300..=399) => Self::Authentication {
                code,
                message: message.unwrap_or_else(|| "Authentication failed".to_string()),
            },
            Some(code @ 400..=499) => Self::Request {
                code: Some(code),
                message: message.unwrap_or_else(|| "Request error".to_string()),
            },
            Some(code @ 500..=599) => Self::Response {
                code,
                message: message.unwrap_or_else(|| "Server error".to_string()),
            },
            Some(RATE_LIMIT_STATUS) => Self::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string(),
            },
            code => Self::Unknown { code, message },
        }
    }

    /// Remote status code carried by this error, if any.
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::Authentication { code, .. } | Self::Response { code, .. } => Some(*code),
            Self::Request { code, .. } | Self::Unknown { code, .. } => *code,
            Self::RateLimited { .. } => Some(RATE_LIMIT_STATUS),
            Self::Configuration(_) | Self::Timeout { .. } | Self::Parse { .. } => None,
        }
    }

    /// Whether this is an expected outcome (bad input, rejected credentials,
    /// quota), used to pick the log level.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::Authentication { .. }
                | Self::Request { code: Some(_), .. }
                | Self::RateLimited { .. }
        )
    }
}

/// Convenience type alias for `Result<T, RegistrarError>`.
pub type Result<T> = std::result::Result<T, RegistrarError>;
