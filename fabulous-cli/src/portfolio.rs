//! Portfolio views computed from a domain listing.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use fabulous_client::DomainSummary;
use fabulous_client::datetime::{days_left, parse_expiry_date};
use serde::Serialize;

/// Placeholder used when sorting rows without an expiry date.
const FAR_FUTURE: &str = "9999-12-31";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Expiry,
    Status,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "expiry" => Ok(Self::Expiry),
            "status" => Ok(Self::Status),
            other => Err(format!("Unknown sort key '{other}' (expected name, expiry or status)")),
        }
    }
}

pub fn sort(domains: &mut [DomainSummary], key: SortKey) {
    match key {
        SortKey::Name => domains.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Expiry => domains.sort_by(|a, b| {
            let a = a.expiry_date.as_deref().unwrap_or(FAR_FUTURE);
            let b = b.expiry_date.as_deref().unwrap_or(FAR_FUTURE);
            a.cmp(b)
        }),
        SortKey::Status => domains.sort_by(|a, b| {
            let a = a.status.as_deref().unwrap_or("Unknown");
            let b = b.status.as_deref().unwrap_or("Unknown");
            a.cmp(b)
        }),
    }
}

/// Substring match on the domain name.
pub fn filter_by_name(domains: Vec<DomainSummary>, needle: &str) -> Vec<DomainSummary> {
    domains
        .into_iter()
        .filter(|d| d.name.as_deref().is_some_and(|n| n.contains(needle)))
        .collect()
}

/// Whether `domain` expires in `1..=days` days from `today`. Already
/// expired or undated domains never match.
pub fn expires_within(domain: &DomainSummary, days: i64, today: NaiveDate) -> bool {
    domain
        .expiry_date
        .as_deref()
        .and_then(|raw| days_left(raw, today))
        .is_some_and(|left| left > 0 && left <= days)
}

pub fn filter_expiring(domains: Vec<DomainSummary>, days: i64, today: NaiveDate) -> Vec<DomainSummary> {
    domains
        .into_iter()
        .filter(|d| expires_within(d, days, today))
        .collect()
}

/// Aggregate counts for the `summary` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    /// Expiry year (or `"Unknown"`) → domain count.
    pub by_expiry_year: BTreeMap<String, usize>,
    pub expiring_30_days: usize,
    pub expiring_90_days: usize,
}

impl Summary {
    pub fn build(domains: &[DomainSummary], today: NaiveDate) -> Self {
        let mut by_expiry_year = BTreeMap::new();
        for domain in domains {
            let year = domain
                .expiry_date
                .as_deref()
                .and_then(parse_expiry_date)
                .map_or_else(|| "Unknown".to_string(), |d| d.year().to_string());
            *by_expiry_year.entry(year).or_insert(0) += 1;
        }
        Self {
            total: domains.len(),
            by_expiry_year,
            expiring_30_days: domains.iter().filter(|d| expires_within(d, 30, today)).count(),
            expiring_90_days: domains.iter().filter(|d| expires_within(d, 90, today)).count(),
        }
    }
}
