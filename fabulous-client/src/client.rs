//! The registrar client.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{RegistrarError, Result};
use crate::pagination::Paginator;
use crate::resources::{Dns, Domains};
use crate::response::ParsedResponse;
use crate::transport::{HttpTransport, Transport};
use crate::types::Params;

/// Entry point for every registrar operation.
///
/// Calls are strictly sequential: each method awaits its reply before
/// returning, and pagination fetches one page at a time.
#[derive(Clone)]
pub struct FabulousClient {
    transport: Arc<dyn Transport>,
}

/// Builder for [`FabulousClient`].
pub struct FabulousClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl FabulousClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Replace the HTTP transport, e.g. with a scripted one in tests.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Credentials are required even with a custom transport.
    pub fn build(self) -> Result<FabulousClient> {
        self.config.validate()?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        Ok(FabulousClient { transport })
    }
}

impl FabulousClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> FabulousClientBuilder {
        FabulousClientBuilder::new(config)
    }

    /// Build from `FABULOUS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self)
    }

    pub fn dns(&self) -> Dns<'_> {
        Dns::new(self)
    }

    /// Page-by-page driver for any paginated action.
    pub fn paginate(&self, action: impl Into<String>, params: Params) -> Paginator<'_> {
        Paginator::new(self, action, params)
    }

    /// Perform one action and parse its reply.
    ///
    /// A reply whose status code is not 200 becomes the matching
    /// [`RegistrarError`] variant.
    pub async fn request(&self, action: &str, params: &Params) -> Result<ParsedResponse> {
        let raw = self.transport.call(action, params).await?;
        let response = ParsedResponse::parse(raw.body).map_err(|e| match e {
            RegistrarError::Parse { detail } => {
                log::error!("[fabulous] {action}: unparseable reply (HTTP {})", raw.status);
                RegistrarError::Parse {
                    detail: format!("{detail} (HTTP {})", raw.status),
                }
            }
            other => other,
        })?;

        if let Some(err) = response.error() {
            if err.is_expected() {
                log::warn!("[fabulous] {action} failed: {err}");
            } else {
                log::error!("[fabulous] {action} failed: {err}");
            }
            return Err(err);
        }
        Ok(response)
    }
}
