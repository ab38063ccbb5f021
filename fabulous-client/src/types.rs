use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Request parameters ============

/// A single query-parameter value sent to the registrar.
///
/// Booleans are rendered as `"true"`/`"false"`, integers in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Free-form string value.
    Str(String),
    /// Integer value (page numbers, TTLs, priorities, years).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered action parameters.
///
/// Insertion order is kept so that requests (and their log lines) are
/// stable; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when `value` is `Some`.
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append numbered nameserver parameters (`ns1`, `ns2`, ...).
    #[must_use]
    pub fn with_nameservers<S: AsRef<str>>(mut self, nameservers: &[S]) -> Self {
        for (i, ns) in nameservers.iter().enumerate() {
            self.insert(format!("ns{}", i + 1), ns.as_ref());
        }
        self
    }
}

// ============ Pagination ============

/// Pagination metadata extracted from one response document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Page this document represents (1-indexed).
    pub current_page: u32,
    /// Total number of pages reported or derived.
    pub page_count: u32,
    /// Whether another page should be requested.
    pub has_more: bool,
}

// ============ Domain Types ============

/// One row of a domain listing.
///
/// Fields missing from the source document stay `None` and are never
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Raw expiry date; see [`crate::datetime::parse_expiry_date`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

/// Detailed information about a single domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Nameservers in document order. `Some(vec![])` when the shape
    /// carries a nameserver list that happens to be empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_privacy: Option<bool>,
}

// ============ DNS Record Types ============

/// DNS record kinds with dedicated registrar actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
}

impl RecordType {
    pub const ALL: [Self; 5] = [Self::A, Self::Aaaa, Self::Cname, Self::Mx, Self::Txt];

    /// Uppercase token used by the API and in action names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
        }
    }

    /// Action listing records of this kind, e.g. `getMXRecords`.
    pub fn list_action(self) -> String {
        format!("get{}Records", self.as_str())
    }

    /// Action creating a record of this kind, e.g. `addMXRecord`.
    pub fn add_action(self) -> String {
        format!("add{}Record", self.as_str())
    }

    /// Action modifying a record of this kind, e.g. `updateMXRecord`.
    pub fn update_action(self) -> String {
        format!("update{}Record", self.as_str())
    }

    /// Action removing a record of this kind, e.g. `deleteMXRecord`.
    pub fn delete_action(self) -> String {
        format!("delete{}Record", self.as_str())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            _ => Err(format!("unsupported record type: {s}")),
        }
    }
}

/// Generic cross-type record view returned by `listDNSrecords`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MxRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CnameRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ARecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AaaaRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxtRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

// ============ Write requests ============

/// Default TTL (seconds) for newly added records.
pub const DEFAULT_TTL: u32 = 3600;

/// Type-safe data for a new DNS record.
///
/// Each variant carries the fields the corresponding `add*Record` action
/// expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    A { hostname: String, ip_address: String },
    #[serde(rename = "AAAA")]
    Aaaa {
        hostname: String,
        ipv6_address: String,
    },
    #[serde(rename = "CNAME")]
    Cname { alias: String, target: String },
    #[serde(rename = "MX")]
    Mx { hostname: String, priority: u32 },
    #[serde(rename = "TXT")]
    Txt { hostname: String, text: String },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::Aaaa { .. } => RecordType::Aaaa,
            Self::Cname { .. } => RecordType::Cname,
            Self::Mx { .. } => RecordType::Mx,
            Self::Txt { .. } => RecordType::Txt,
        }
    }

    /// Append this record's API fields to `params`.
    pub(crate) fn append_to(&self, params: Params) -> Params {
        match self {
            Self::A {
                hostname,
                ip_address,
            } => params
                .with("hostname", hostname)
                .with("ipAddress", ip_address),
            Self::Aaaa {
                hostname,
                ipv6_address,
            } => params
                .with("hostname", hostname)
                .with("ipv6Address", ipv6_address),
            Self::Cname { alias, target } => params.with("alias", alias).with("target", target),
            Self::Mx { hostname, priority } => params
                .with("hostname", hostname)
                .with("priority", *priority),
            Self::Txt { hostname, text } => params.with("hostname", hostname).with("text", text),
        }
    }
}

/// Partial update of an existing record; `None` fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordUpdate {
    A {
        hostname: Option<String>,
        ip_address: Option<String>,
    },
    #[serde(rename = "AAAA")]
    Aaaa {
        hostname: Option<String>,
        ipv6_address: Option<String>,
    },
    #[serde(rename = "CNAME")]
    Cname {
        alias: Option<String>,
        target: Option<String>,
    },
    #[serde(rename = "MX")]
    Mx {
        hostname: Option<String>,
        priority: Option<u32>,
    },
    #[serde(rename = "TXT")]
    Txt {
        hostname: Option<String>,
        text: Option<String>,
    },
}

impl RecordUpdate {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::Aaaa { .. } => RecordType::Aaaa,
            Self::Cname { .. } => RecordType::Cname,
            Self::Mx { .. } => RecordType::Mx,
            Self::Txt { .. } => RecordType::Txt,
        }
    }

    /// An update of `record_type` that changes nothing (yet).
    pub fn empty(record_type: RecordType) -> Self {
        match record_type {
            RecordType::A => Self::A {
                hostname: None,
                ip_address: None,
            },
            RecordType::Aaaa => Self::Aaaa {
                hostname: None,
                ipv6_address: None,
            },
            RecordType::Cname => Self::Cname {
                alias: None,
                target: None,
            },
            RecordType::Mx => Self::Mx {
                hostname: None,
                priority: None,
            },
            RecordType::Txt => Self::Txt {
                hostname: None,
                text: None,
            },
        }
    }

    pub(crate) fn append_to(&self, params: Params) -> Params {
        match self {
            Self::A {
                hostname,
                ip_address,
            } => params
                .with_opt("hostname", hostname.as_ref())
                .with_opt("ipAddress", ip_address.as_ref()),
            Self::Aaaa {
                hostname,
                ipv6_address,
            } => params
                .with_opt("hostname", hostname.as_ref())
                .with_opt("ipv6Address", ipv6_address.as_ref()),
            Self::Cname { alias, target } => params
                .with_opt("alias", alias.as_ref())
                .with_opt("target", target.as_ref()),
            Self::Mx { hostname, priority } => params
                .with_opt("hostname", hostname.as_ref())
                .with_opt("priority", *priority),
            Self::Txt { hostname, text } => params
                .with_opt("hostname", hostname.as_ref())
                .with_opt("text", text.as_ref()),
        }
    }
}

/// Options for `registerDomain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOptions {
    pub years: u32,
    pub nameservers: Vec<String>,
    pub whois_privacy: bool,
    pub auto_renew: bool,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            years: 1,
            nameservers: Vec::new(),
            whois_privacy: false,
            auto_renew: false,
        }
    }
}

// ============ Generic fallback ============

/// Value in a generically decoded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenericValue {
    /// Text content of a leaf element.
    Text(String),
    /// Repeated sibling tags, in document order.
    List(Vec<GenericValue>),
    /// Nested element children keyed by tag name.
    Map(GenericMap),
}

/// Tag name → decoded value.
pub type GenericMap = BTreeMap<String, GenericValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_insert_replaces_in_place() {
        let mut p = Params::new().with("domain", "a.com").with("page", 1_u32);
        p.insert("domain", "b.com");
        let keys: Vec<_> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["domain", "page"]);
        assert_eq!(p.get("domain"), Some(&ParamValue::Str("b.com".into())));
    }

    #[test]
    fn params_with_opt_skips_none() {
        let p = Params::new()
            .with_opt("ttl", Some(600_u32))
            .with_opt::<u32>("priority", None);
        assert_eq!(p.len(), 1);
        assert!(p.get("priority").is_none());
    }

    #[test]
    fn params_nameservers_are_numbered() {
        let p = Params::new().with_nameservers(&["ns1.example.net", "ns2.example.net"]);
        assert_eq!(p.get("ns1").map(ToString::to_string).as_deref(), Some("ns1.example.net"));
        assert_eq!(p.get("ns2").map(ToString::to_string).as_deref(), Some("ns2.example.net"));
    }

    #[test]
    fn param_value_rendering() {
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
        assert_eq!(ParamValue::Int(3600).to_string(), "3600");
    }

    #[test]
    fn record_type_actions() {
        assert_eq!(RecordType::Mx.list_action(), "getMXRecords");
        assert_eq!(RecordType::Aaaa.add_action(), "addAAAARecord");
        assert_eq!(RecordType::Cname.update_action(), "updateCNAMERecord");
        assert_eq!(RecordType::Txt.delete_action(), "deleteTXTRecord");
    }

    #[test]
    fn record_type_from_str_is_case_insensitive() {
        assert_eq!("cname".parse::<RecordType>(), Ok(RecordType::Cname));
        assert!("SRV".parse::<RecordType>().is_err());
    }

    #[test]
    fn record_data_params_use_api_field_names() {
        let p = RecordData::Aaaa {
            hostname: "www".into(),
            ipv6_address: "2001:db8::1".into(),
        }
        .append_to(Params::new());
        assert!(p.get("ipv6Address").is_some());

        let p = RecordData::Cname {
            alias: "blog".into(),
            target: "example.net".into(),
        }
        .append_to(Params::new());
        assert_eq!(p.get("alias"), Some(&ParamValue::Str("blog".into())));
    }

    #[test]
    fn record_update_sends_only_given_fields() {
        let p = RecordUpdate::Mx {
            hostname: None,
            priority: Some(20),
        }
        .append_to(Params::new());
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("priority"), Some(&ParamValue::Int(20)));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let d = DomainSummary {
            name: Some("example.com".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "example.com" }));
    }
}
