//! Payload classification.
//!
//! Each payload section is resolved by an ordered rule table: rules are
//! tried top to bottom and the first whose selector matches anything
//! supplies the section. Sections are independent of each other, so one
//! document may fill several of them.

use roxmltree::Node;

use super::xml::{
    child, child_flag, child_int, child_text, children_at, find_all, find_first, text_content,
};
use super::ResponseData;
use crate::types::{
    ARecord, AaaaRecord, CnameRecord, DnsRecord, DomainInfo, DomainSummary, MxRecord, TxtRecord,
};

type Selector = for<'a, 'i> fn(Node<'a, 'i>) -> Vec<Node<'a, 'i>>;
type Extractor<T> = for<'a, 'i> fn(&[Node<'a, 'i>]) -> Option<T>;

/// One `(predicate, extractor)` pair. The predicate is "the selector
/// returned at least one node"; an extractor returning `None` passes the
/// turn to the next rule.
pub(crate) struct Rule<T> {
    name: &'static str,
    select: Selector,
    extract: Extractor<T>,
}

/// Run `rules` in order; the first non-empty selection wins.
pub(crate) fn first_match<T>(root: Node<'_, '_>, rules: &[Rule<T>]) -> Option<T> {
    rules.iter().find_map(|rule| {
        let nodes = (rule.select)(root);
        if nodes.is_empty() {
            return None;
        }
        log::trace!("Rule '{}' matched {} node(s)", rule.name, nodes.len());
        (rule.extract)(&nodes)
    })
}

// ============ Domain lists ============

/// Result rows short-circuit every older shape.
pub(crate) const DOMAIN_LIST_RULES: &[Rule<Vec<DomainSummary>>] = &[
    Rule {
        name: "results/result",
        select: |root| find_all(root, &["results", "result"]),
        extract: |rows| Some(rows.iter().map(|r| result_row(*r)).collect()),
    },
    Rule {
        name: "response/domains/domain",
        select: |root| find_all(root, &["response", "domains", "domain"]),
        extract: |nodes| Some(nodes.iter().map(|n| domain_element(*n)).collect()),
    },
    Rule {
        name: "domains/domain",
        select: |root| find_all(root, &["domains", "domain"]),
        extract: |nodes| Some(nodes.iter().map(|n| domain_element(*n)).collect()),
    },
    Rule {
        name: "domain",
        select: |root| find_all(root, &["domain"]),
        extract: |nodes| Some(nodes.iter().map(|n| domain_element(*n)).collect()),
    },
];

/// Newer listing row: `<result><domain>..</domain><exdate>..</exdate></result>`.
fn result_row(row: Node<'_, '_>) -> DomainSummary {
    DomainSummary {
        name: child_text(row, "domain"),
        status: Some("Active".to_string()),
        expiry_date: child_text(row, "exdate"),
        auto_renew: None,
        locked: None,
    }
}

fn domain_element(node: Node<'_, '_>) -> DomainSummary {
    DomainSummary {
        name: child_text(node, "name"),
        status: child_text(node, "status"),
        expiry_date: child_text(node, "expiryDate"),
        auto_renew: child_flag(node, "autoRenew", "true"),
        locked: child_flag(node, "locked", "true"),
    }
}

// ============ Domain info ============

pub(crate) const DOMAIN_INFO_RULES: &[Rule<DomainInfo>] = &[
    Rule {
        name: "domainInfo",
        select: |root| find_first(root, &["domainInfo"]).into_iter().collect(),
        extract: |nodes| nodes.first().map(|n| domain_info_element(*n)),
    },
    Rule {
        name: "results/result[expiry]",
        select: |root| {
            find_all(root, &["results", "result"])
                .into_iter()
                .find(|r| child(*r, "expiry").is_some())
                .into_iter()
                .collect()
        },
        extract: |nodes| nodes.first().map(|n| info_result_row(*n)),
    },
    Rule {
        name: "domain status",
        select: |root| find_first(root, &["domain"]).into_iter().collect(),
        extract: |nodes| {
            nodes.first().map(|n| DomainInfo {
                status: Some(child_text(*n, "status").unwrap_or_else(|| "Active".to_string())),
                ..DomainInfo::default()
            })
        },
    },
];

fn domain_info_element(info: Node<'_, '_>) -> DomainInfo {
    DomainInfo {
        name: child_text(info, "name"),
        status: child_text(info, "status"),
        creation_date: child_text(info, "creationDate"),
        expiry_date: child_text(info, "expiryDate"),
        nameservers: Some(
            children_at(info, "nameservers", "nameserver")
                .into_iter()
                .map(text_content)
                .collect(),
        ),
        auto_renew: child_flag(info, "autoRenew", "true"),
        locked: child_flag(info, "locked", "true"),
        whois_privacy: child_flag(info, "whoisPrivacy", "true"),
    }
}

/// `domainInfo` action reply in the result-row layout.
fn info_result_row(row: Node<'_, '_>) -> DomainInfo {
    let registry_statuses = children_at(row, "registrystatuss", "registrystatus");
    let locked = (!registry_statuses.is_empty()).then(|| {
        registry_statuses
            .iter()
            .any(|s| text_content(*s).contains("Prohibited"))
    });
    DomainInfo {
        expiry_date: child_text(row, "expiry"),
        nameservers: Some(
            children_at(row, "nameserverss", "nameservers")
                .into_iter()
                .map(text_content)
                .collect(),
        ),
        status: Some(
            child_text(row, "fabstatus")
                .map_or_else(|| "Active".to_string(), |s| capitalize(&s)),
        ),
        auto_renew: child_flag(row, "autorenewstatus", "1"),
        locked,
        whois_privacy: child_flag(row, "whoisprivacyenabled", "1"),
        ..DomainInfo::default()
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============ Records ============

/// Every `//tag` element mapped through `parse`, or `None` when the
/// document has no such element.
fn records<T>(root: Node<'_, '_>, tag: &str, parse: fn(Node<'_, '_>) -> T) -> Option<Vec<T>> {
    let nodes = find_all(root, &[tag]);
    (!nodes.is_empty()).then(|| nodes.into_iter().map(parse).collect())
}

fn dns_record(node: Node<'_, '_>) -> DnsRecord {
    DnsRecord {
        id: child_text(node, "id"),
        record_type: child_text(node, "type"),
        name: child_text(node, "name"),
        value: child_text(node, "value"),
        ttl: child_int(node, "ttl"),
        priority: child_int(node, "priority"),
    }
}

fn mx_record(node: Node<'_, '_>) -> MxRecord {
    MxRecord {
        id: child_text(node, "id"),
        hostname: child_text(node, "hostname"),
        priority: child_int(node, "priority"),
        ttl: child_int(node, "ttl"),
    }
}

fn cname_record(node: Node<'_, '_>) -> CnameRecord {
    CnameRecord {
        id: child_text(node, "id"),
        alias: child_text(node, "alias"),
        target: child_text(node, "target"),
        ttl: child_int(node, "ttl"),
    }
}

fn a_record(node: Node<'_, '_>) -> ARecord {
    ARecord {
        id: child_text(node, "id"),
        hostname: child_text(node, "hostname"),
        ip_address: child_text(node, "ipAddress"),
        ttl: child_int(node, "ttl"),
    }
}

fn aaaa_record(node: Node<'_, '_>) -> AaaaRecord {
    AaaaRecord {
        id: child_text(node, "id"),
        hostname: child_text(node, "hostname"),
        ipv6_address: child_text(node, "ipv6Address"),
        ttl: child_int(node, "ttl"),
    }
}

fn txt_record(node: Node<'_, '_>) -> TxtRecord {
    TxtRecord {
        id: child_text(node, "id"),
        hostname: child_text(node, "hostname"),
        text: child_text(node, "text"),
        ttl: child_int(node, "ttl"),
    }
}

// ============ Entry point ============

/// Resolve every typed section of the document.
pub(crate) fn classify(root: Node<'_, '_>) -> ResponseData {
    ResponseData {
        domains: first_match(root, DOMAIN_LIST_RULES),
        domain_info: first_match(root, DOMAIN_INFO_RULES),
        dns_records: records(root, "dnsrecord", dns_record),
        mx_records: records(root, "mxrecord", mx_record),
        cname_records: records(root, "cnamerecord", cname_record),
        a_records: records(root, "arecord", a_record),
        aaaa_records: records(root, "aaaarecord", aaaa_record),
        txt_records: records(root, "txtrecord", txt_record),
        available: find_first(root, &["availability"]).map(|n| text_content(n).trim() == "true"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::xml::parse_document;

    fn classify_str(xml: &str) -> ResponseData {
        let doc = parse_document(xml).unwrap();
        classify(doc.root())
    }

    #[test]
    fn info_extractors_tolerate_empty_selection() {
        for rule in DOMAIN_INFO_RULES {
            assert!((rule.extract)(&[]).is_none(), "rule '{}'", rule.name);
        }
    }

    #[test]
    fn declining_extractor_passes_to_next_rule() {
        const RULES: &[Rule<&'static str>] = &[
            Rule {
                name: "declines",
                select: |root| find_all(root, &["domain"]),
                extract: |_| None,
            },
            Rule {
                name: "accepts",
                select: |root| find_all(root, &["domain"]),
                extract: |_| Some("second"),
            },
        ];
        let doc = parse_document("<response><domain/></response>").unwrap();
        assert_eq!(first_match(doc.root(), RULES), Some("second"));
    }

    #[test]
    fn result_rows_win_over_domain_elements() {
        let data = classify_str(
            "<response><results count=\"1\"><result><domain>new.com</domain><exdate>2027-01-01</exdate></result></results>\
             <domains><domain><name>old.com</name></domain></domains></response>",
        );
        let domains = data.domains.unwrap();
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name.as_deref(), Some("new.com"));
        assert_eq!(domains[0].status.as_deref(), Some("Active"));
        assert_eq!(domains[0].expiry_date.as_deref(), Some("2027-01-01"));
        assert!(domains[0].auto_renew.is_none());
        assert!(domains[0].locked.is_none());
    }

    #[test]
    fn bare_domain_elements_are_the_last_resort() {
        let data = classify_str(
            "<reply><domain><name>a.com</name><status>Active</status></domain></reply>",
        );
        assert_eq!(data.domains.unwrap()[0].name.as_deref(), Some("a.com"));
        // A bare <domain> also feeds the status-only info shape.
        assert_eq!(data.domain_info.unwrap().status.as_deref(), Some("Active"));
    }

    #[test]
    fn info_result_row_shape() {
        let data = classify_str(
            "<response><results count=\"1\"><result>\
               <domain>example.com</domain><expiry>2027-05-01</expiry>\
               <nameserverss><nameservers>ns1.host.net</nameservers><nameservers>ns2.host.net</nameservers></nameserverss>\
               <fabstatus>ACTIVE</fabstatus><autorenewstatus>1</autorenewstatus>\
               <registrystatuss><registrystatus>clientTransferProhibited</registrystatus></registrystatuss>\
               <whoisprivacyenabled>0</whoisprivacyenabled>\
             </result></results></response>",
        );
        let info = data.domain_info.unwrap();
        assert_eq!(info.expiry_date.as_deref(), Some("2027-05-01"));
        assert_eq!(
            info.nameservers.unwrap(),
            ["ns1.host.net", "ns2.host.net"]
        );
        assert_eq!(info.status.as_deref(), Some("Active"));
        assert_eq!(info.auto_renew, Some(true));
        assert_eq!(info.locked, Some(true));
        assert_eq!(info.whois_privacy, Some(false));
        assert!(info.name.is_none());
    }

    #[test]
    fn info_status_defaults_to_active() {
        let data = classify_str(
            "<response><results><result><expiry>2027-05-01</expiry></result></results></response>",
        );
        let info = data.domain_info.unwrap();
        assert_eq!(info.status.as_deref(), Some("Active"));
        assert!(info.locked.is_none());
        assert_eq!(info.nameservers, Some(Vec::new()));
    }

    #[test]
    fn domain_info_element_full_field_set() {
        let data = classify_str(
            "<response><domainInfo><name>example.com</name><status>Active</status>\
             <creationDate>2020-01-01</creationDate><expiryDate>2026-01-01</expiryDate>\
             <nameservers><nameserver>ns1.a.net</nameserver></nameservers>\
             <autoRenew>true</autoRenew><locked>false</locked><whoisPrivacy>true</whoisPrivacy>\
             </domainInfo></response>",
        );
        let info = data.domain_info.unwrap();
        assert_eq!(info.name.as_deref(), Some("example.com"));
        assert_eq!(info.creation_date.as_deref(), Some("2020-01-01"));
        assert_eq!(info.nameservers.unwrap(), ["ns1.a.net"]);
        assert_eq!(info.auto_renew, Some(true));
        assert_eq!(info.locked, Some(false));
        assert_eq!(info.whois_privacy, Some(true));
    }

    #[test]
    fn record_lists_merge_independently() {
        let data = classify_str(
            "<response>\
               <mxrecord><id>1</id><hostname>mail.a.com</hostname><priority>10</priority><ttl>3600</ttl></mxrecord>\
               <arecord><id>2</id><hostname>www</hostname><ipAddress>192.0.2.1</ipAddress></arecord>\
               <aaaarecord><id>3</id><hostname>www</hostname><ipv6Address>2001:db8::1</ipv6Address></aaaarecord>\
               <txtrecord><id>4</id><hostname>@</hostname><text>v=spf1 -all</text></txtrecord>\
             </response>",
        );
        let mx = data.mx_records.unwrap();
        assert_eq!(mx[0].priority, Some(10));
        assert_eq!(mx[0].ttl, Some(3600));
        assert_eq!(
            data.a_records.unwrap()[0].ip_address.as_deref(),
            Some("192.0.2.1")
        );
        assert_eq!(
            data.aaaa_records.unwrap()[0].ipv6_address.as_deref(),
            Some("2001:db8::1")
        );
        assert_eq!(
            data.txt_records.unwrap()[0].text.as_deref(),
            Some("v=spf1 -all")
        );
        assert!(data.cname_records.is_none());
        assert!(data.dns_records.is_none());
        assert!(data.domains.is_none());
    }

    #[test]
    fn unparseable_ttl_is_absent() {
        let data = classify_str(
            "<response><dnsrecord><id>9</id><type>A</type><ttl>soon</ttl></dnsrecord></response>",
        );
        let rec = &data.dns_records.unwrap()[0];
        assert_eq!(rec.record_type.as_deref(), Some("A"));
        assert!(rec.ttl.is_none());
        assert!(rec.priority.is_none());
    }

    #[test]
    fn availability_flag() {
        assert_eq!(
            classify_str("<response><availability>true</availability></response>").available,
            Some(true)
        );
        assert_eq!(
            classify_str("<response><availability>false</availability></response>").available,
            Some(false)
        );
        assert_eq!(classify_str("<response/>").available, None);
    }

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("pendingTRANSFER"), "Pendingtransfer");
        assert_eq!(capitalize(""), "");
    }
}
