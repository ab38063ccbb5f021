//! Response parsing.
//!
//! One raw XML document becomes one immutable [`ParsedResponse`]: status,
//! optional pagination metadata and a [`Payload`]. Typed sections are
//! resolved by the ordered rule tables in `classify`; documents that match
//! none of them fall back to a generic tag map.

mod classify;
mod generic;
mod paging;
mod xml;

use roxmltree::Node;
use serde::Serialize;

use crate::error::{RegistrarError, Result};
use crate::types::{
    ARecord, AaaaRecord, CnameRecord, DnsRecord, DomainInfo, DomainSummary, GenericMap, MxRecord,
    PaginationInfo, TxtRecord,
};

/// Status code the registrar uses for success. No other code, 2xx
/// included, counts.
pub const SUCCESS_STATUS: i64 = 200;

// ============ Payload ============

/// Every typed section recognised in one document.
///
/// Sections are independent: a single reply may carry a domain list and a
/// domain info block side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<DomainSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_info: Option<DomainInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_records: Option<Vec<DnsRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_records: Option<Vec<MxRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname_records: Option<Vec<CnameRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a_records: Option<Vec<ARecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aaaa_records: Option<Vec<AaaaRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txt_records: Option<Vec<TxtRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl ResponseData {
    /// `true` when no section was recognised.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Classified content of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Payload {
    /// At least one typed section was recognised.
    Typed(ResponseData),
    /// Nothing was recognised; root children decoded by tag name.
    Generic(GenericMap),
}

impl Payload {
    /// Typed sections, if this is a typed payload.
    pub fn data(&self) -> Option<&ResponseData> {
        match self {
            Self::Typed(data) => Some(data),
            Self::Generic(_) => None,
        }
    }

    /// Generic map, if nothing typed was recognised.
    pub fn generic(&self) -> Option<&GenericMap> {
        match self {
            Self::Typed(_) => None,
            Self::Generic(map) => Some(map),
        }
    }
}

// ============ ParsedResponse ============

/// One parsed registrar reply. Never mutated after [`parse`](Self::parse).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_message: Option<String>,
    payload: Payload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationInfo>,
    #[serde(skip)]
    raw_xml: String,
}

impl ParsedResponse {
    /// Parse one XML document.
    ///
    /// Malformed XML fails with [`RegistrarError::Parse`]. A document
    /// without a usable status code parses fine but is never a success.
    pub fn parse(xml: impl Into<String>) -> Result<Self> {
        let raw_xml = xml.into();
        let doc = xml::parse_document(&raw_xml)?;
        let root = doc.root();

        let status_code = first_non_empty(root, &[&["statusCode"], &["response", "status"]])
            .and_then(|text| xml::parse_int(&text));
        let status_message = first_non_empty(root, &[&["statusText"], &["response", "reason"]]);
        let pagination = paging::detect(root);

        let data = classify::classify(root);
        let payload = if data.is_empty() {
            Payload::Generic(generic::decode_root(doc.root_element()))
        } else {
            Payload::Typed(data)
        };

        drop(doc);
        Ok(Self {
            success: status_code == Some(SUCCESS_STATUS),
            status_code,
            status_message,
            payload,
            pagination,
            raw_xml,
        })
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn status_code(&self) -> Option<i64> {
        self.status_code
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn pagination(&self) -> Option<PaginationInfo> {
        self.pagination
    }

    /// Whether the driver should request another page.
    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_more)
    }

    /// The document this response was parsed from.
    pub fn raw_xml(&self) -> &str {
        &self.raw_xml
    }

    /// Classified error for a non-success reply, `None` on success.
    pub fn error(&self) -> Option<RegistrarError> {
        (!self.success)
            .then(|| RegistrarError::from_status(self.status_code, self.status_message.clone()))
    }

    /// `Ok(self)` on success, otherwise the classified error.
    pub fn into_result(self) -> Result<Self> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    // ---- section accessors; absent sections read as empty ----

    pub fn domains(&self) -> &[DomainSummary] {
        self.section(|d| d.domains.as_deref())
    }

    pub fn domain_info(&self) -> Option<&DomainInfo> {
        self.payload.data().and_then(|d| d.domain_info.as_ref())
    }

    pub fn available(&self) -> Option<bool> {
        self.payload.data().and_then(|d| d.available)
    }

    pub fn dns_records(&self) -> &[DnsRecord] {
        self.section(|d| d.dns_records.as_deref())
    }

    pub fn mx_records(&self) -> &[MxRecord] {
        self.section(|d| d.mx_records.as_deref())
    }

    pub fn cname_records(&self) -> &[CnameRecord] {
        self.section(|d| d.cname_records.as_deref())
    }

    pub fn a_records(&self) -> &[ARecord] {
        self.section(|d| d.a_records.as_deref())
    }

    pub fn aaaa_records(&self) -> &[AaaaRecord] {
        self.section(|d| d.aaaa_records.as_deref())
    }

    pub fn txt_records(&self) -> &[TxtRecord] {
        self.section(|d| d.txt_records.as_deref())
    }

    fn section<'a, T>(&'a self, get: impl FnOnce(&'a ResponseData) -> Option<&'a [T]>) -> &'a [T] {
        self.payload.data().and_then(get).unwrap_or(&[])
    }
}

/// Text of the first element with non-blank content, trying each path in
/// turn.
fn first_non_empty(root: Node<'_, '_>, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| {
        xml::find_all(root, path)
            .into_iter()
            .map(xml::text_content)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
    })
}
