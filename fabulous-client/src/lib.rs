//! # fabulous-client
//!
//! Client library for the Fabulous domain registrar's XML-over-HTTP API.
//!
//! Every operation is a `GET {base_url}/{action}` carrying the account
//! credentials as query parameters. Replies are XML documents in several
//! historical layouts; [`ParsedResponse`] folds them into one typed shape
//! and classifies failures by the numeric status code they carry.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fabulous_client::{ClientConfig, FabulousClient, RecordData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FabulousClient::new(ClientConfig::new("user", "password"))?;
//!
//!     // Walks every page of `listDomains`.
//!     for domain in client.domains().all().await? {
//!         println!("{:?} expires {:?}", domain.name, domain.expiry_date);
//!     }
//!
//!     if client.domains().check("example.org").await? == Some(true) {
//!         println!("example.org is available");
//!     }
//!
//!     let record = RecordData::A {
//!         hostname: "www".to_string(),
//!         ip_address: "192.0.2.10".to_string(),
//!     };
//!     client.dns().add_record("example.com", &record, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! [`Paginator`] has two explicit modes: [`collect`](Paginator::collect)
//! gathers one item list across pages, [`for_each_page`](Paginator::for_each_page)
//! hands each page to a callback that may stop the run. [`Paginator::stream`]
//! exposes the same walk as a lazy [`futures::Stream`].
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, RegistrarError>`](RegistrarError):
//!
//! - status `300..=399` → [`RegistrarError::Authentication`]
//! - status `400..=499` → [`RegistrarError::Request`]
//! - status `500..=599` → [`RegistrarError::Response`]
//! - status `689` → [`RegistrarError::RateLimited`]
//! - transport timeouts → [`RegistrarError::Timeout`]
//! - malformed XML → [`RegistrarError::Parse`]
//!
//! Nothing is retried.

mod client;
mod config;
mod error;
mod pagination;
mod resources;
mod response;
mod transport;
mod types;
mod utils;

// Re-export error types
pub use error::{RATE_LIMIT_MESSAGE, RATE_LIMIT_STATUS, RegistrarError, Result};

// Re-export client and configuration
pub use client::{FabulousClient, FabulousClientBuilder};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
    ENV_BASE_URL, ENV_CONNECT_TIMEOUT_SECS, ENV_PASSWORD, ENV_TIMEOUT_SECS, ENV_USERNAME,
};
pub use pagination::{Page, Paginator};
pub use resources::{Dns, Domains};
pub use transport::{HttpTransport, RawResponse, Transport};

// Re-export response model
pub use response::{ParsedResponse, Payload, ResponseData, SUCCESS_STATUS};

// Re-export types
pub use types::{
    ARecord, AaaaRecord, CnameRecord, DEFAULT_TTL, DnsRecord, DomainInfo, DomainSummary,
    GenericMap, GenericValue, MxRecord, PaginationInfo, ParamValue, Params, RecordData,
    RecordType, RecordUpdate, RegisterOptions, TxtRecord,
};

// Re-export utils module
pub use utils::datetime;
