//! `field=value` arguments for `dns add` / `dns update`.

use std::collections::BTreeMap;

use anyhow::{Context, anyhow, bail};
use fabulous_client::{RecordData, RecordType, RecordUpdate};

const KNOWN_FIELDS: &[&str] = &[
    "hostname",
    "ip_address",
    "ipv6_address",
    "alias",
    "target",
    "priority",
    "text",
    "ttl",
];

#[derive(Debug, Default)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    pub fn parse(raw: &[String]) -> anyhow::Result<Self> {
        let mut fields = BTreeMap::new();
        for arg in raw {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected field=value, got '{arg}'"))?;
            if !KNOWN_FIELDS.contains(&key) {
                bail!("Unknown field '{key}' (expected one of: {})", KNOWN_FIELDS.join(", "));
            }
            fields.insert(key.to_string(), value.to_string());
        }
        Ok(Self(fields))
    }

    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn require(&self, key: &str, record_type: RecordType) -> anyhow::Result<String> {
        self.get(key)
            .ok_or_else(|| anyhow!("{record_type} record requires {key}=..."))
    }

    fn number(&self, key: &str) -> anyhow::Result<Option<u32>> {
        self.0
            .get(key)
            .map(|raw| {
                raw.parse::<u32>()
                    .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'"))
            })
            .transpose()
    }

    pub fn ttl(&self) -> anyhow::Result<Option<u32>> {
        self.number("ttl")
    }

    /// Build a complete record; every field of the type is required.
    pub fn record_data(&self, record_type: RecordType) -> anyhow::Result<RecordData> {
        let t = record_type;
        Ok(match record_type {
            RecordType::A => RecordData::A {
                hostname: self.require("hostname", t)?,
                ip_address: self.require("ip_address", t)?,
            },
            RecordType::Aaaa => RecordData::Aaaa {
                hostname: self.require("hostname", t)?,
                ipv6_address: self.require("ipv6_address", t)?,
            },
            RecordType::Cname => RecordData::Cname {
                alias: self.require("alias", t)?,
                target: self.require("target", t)?,
            },
            RecordType::Mx => RecordData::Mx {
                hostname: self.require("hostname", t)?,
                priority: self
                    .number("priority")?
                    .ok_or_else(|| anyhow!("MX record requires priority=..."))?,
            },
            RecordType::Txt => RecordData::Txt {
                hostname: self.require("hostname", t)?,
                text: self.require("text", t)?,
            },
        })
    }

    /// Build a partial update from whichever fields were given.
    pub fn record_update(&self, record_type: RecordType) -> anyhow::Result<RecordUpdate> {
        Ok(match record_type {
            RecordType::A => RecordUpdate::A {
                hostname: self.get("hostname"),
                ip_address: self.get("ip_address"),
            },
            RecordType::Aaaa => RecordUpdate::Aaaa {
                hostname: self.get("hostname"),
                ipv6_address: self.get("ipv6_address"),
            },
            RecordType::Cname => RecordUpdate::Cname {
                alias: self.get("alias"),
                target: self.get("target"),
            },
            RecordType::Mx => RecordUpdate::Mx {
                hostname: self.get("hostname"),
                priority: self.number("priority")?,
            },
            RecordType::Txt => RecordUpdate::Txt {
                hostname: self.get("hostname"),
                text: self.get("text"),
            },
        })
    }
}
