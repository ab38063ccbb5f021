//! Outbound calls to the registrar.
//!
//! Every action is a `GET {base_url}/{action}` whose query string carries
//! the account credentials followed by the action parameters. The reply
//! body is returned untouched; classification happens in
//! [`crate::response`].

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{RegistrarError, Result};
use crate::types::Params;
use crate::utils::log_sanitizer::{redacted_query, truncate_for_log};

/// Raw HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status. The registrar reports failures in the body, so this is
    /// informational only.
    pub status: u16,
    pub body: String,
}

/// One request/response round trip per call.
///
/// Implementations classify their own failures: timeouts as
/// [`RegistrarError::Timeout`], everything else as
/// [`RegistrarError::Request`] without a status code.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, action: &str, params: &Params) -> Result<RawResponse>;
}

// ============ HTTP ============

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpTransport {
    /// Build from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                RegistrarError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone().unwrap_or_default(),
            password: config.password.clone().unwrap_or_default(),
        })
    }

    fn url(&self, action: &str) -> String {
        format!("{}/{}", self.base_url, action.trim_start_matches('/'))
    }

    /// Credentials first; a caller-supplied key of the same name wins.
    fn query(&self, params: &Params) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ];
        for (key, value) in params.iter() {
            let value = value.to_string();
            match query.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value,
                None => query.push((key.to_string(), value)),
            }
        }
        query
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, action: &str, params: &Params) -> Result<RawResponse> {
        let url = self.url(action);
        let query = self.query(params);
        log::debug!(
            "[fabulous] GET {url}?{}",
            redacted_query(query.iter().map(|(k, v)| (k.as_str(), v.clone())))
        );

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| classify_failure(&e, e.is_timeout()))?;

        let status = response.status().as_u16();
        log::debug!("[fabulous] {action} -> HTTP {status}");

        let body = response
            .text()
            .await
            .map_err(|e| classify_failure(&e, e.is_timeout()))?;
        log::debug!("[fabulous] Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse { status, body })
    }
}

/// Map a transport failure: explicit timeouts, or any message that reads
/// like one (`timeout`, `expired`), become [`RegistrarError::Timeout`].
pub(crate) fn classify_failure(error: &dyn std::error::Error, is_timeout: bool) -> RegistrarError {
    let detail = error_chain(error);
    let lowered = detail.to_ascii_lowercase();
    if is_timeout || lowered.contains("timeout") || lowered.contains("expired") {
        RegistrarError::Timeout { detail }
    } else {
        RegistrarError::Request {
            code: None,
            message: detail,
        }
    }
}

/// `outer: inner: root` rendering of an error and its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
