use crate::client::FabulousClient;
use crate::error::Result;
use crate::response::ParsedResponse;
use crate::types::{
    ARecord, AaaaRecord, CnameRecord, DEFAULT_TTL, DnsRecord, MxRecord, Params, RecordData,
    RecordType, RecordUpdate, TxtRecord,
};

/// DNS record operations for domains hosted on the registrar's
/// nameservers.
pub struct Dns<'c> {
    client: &'c FabulousClient,
}

impl<'c> Dns<'c> {
    pub(crate) fn new(client: &'c FabulousClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, action: &str, domain: &str) -> Result<ParsedResponse> {
        self.client
            .request(action, &Params::new().with("domain", domain))
            .await
    }

    /// Every record of the zone, optionally narrowed to one type.
    pub async fn list_records(
        &self,
        domain: &str,
        record_type: Option<RecordType>,
    ) -> Result<Vec<DnsRecord>> {
        let params = Params::new()
            .with("domain", domain)
            .with_opt("type", record_type.map(RecordType::as_str));
        let response = self.client.request("listDNSrecords", &params).await?;
        Ok(response.dns_records().to_vec())
    }

    // ============ Typed listings ============

    pub async fn a_records(&self, domain: &str) -> Result<Vec<ARecord>> {
        let response = self.fetch(&RecordType::A.list_action(), domain).await?;
        Ok(response.a_records().to_vec())
    }

    pub async fn aaaa_records(&self, domain: &str) -> Result<Vec<AaaaRecord>> {
        let response = self.fetch(&RecordType::Aaaa.list_action(), domain).await?;
        Ok(response.aaaa_records().to_vec())
    }

    pub async fn cname_records(&self, domain: &str) -> Result<Vec<CnameRecord>> {
        let response = self.fetch(&RecordType::Cname.list_action(), domain).await?;
        Ok(response.cname_records().to_vec())
    }

    pub async fn mx_records(&self, domain: &str) -> Result<Vec<MxRecord>> {
        let response = self.fetch(&RecordType::Mx.list_action(), domain).await?;
        Ok(response.mx_records().to_vec())
    }

    pub async fn txt_records(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let response = self.fetch(&RecordType::Txt.list_action(), domain).await?;
        Ok(response.txt_records().to_vec())
    }

    // ============ Changes ============

    /// Create a record. `ttl` defaults to [`DEFAULT_TTL`].
    pub async fn add_record(
        &self,
        domain: &str,
        record: &RecordData,
        ttl: Option<u32>,
    ) -> Result<()> {
        let params = record
            .append_to(Params::new().with("domain", domain))
            .with("ttl", ttl.unwrap_or(DEFAULT_TTL));
        self.client
            .request(&record.record_type().add_action(), &params)
            .await
            .map(|_| ())
    }

    /// Change an existing record. Only the fields that are set, plus `ttl`
    /// if given, are sent.
    pub async fn update_record(
        &self,
        domain: &str,
        record_id: &str,
        update: &RecordUpdate,
        ttl: Option<u32>,
    ) -> Result<()> {
        let params = update
            .append_to(Params::new().with("domain", domain).with("recordId", record_id))
            .with_opt("ttl", ttl);
        self.client
            .request(&update.record_type().update_action(), &params)
            .await
            .map(|_| ())
    }

    pub async fn delete_record(
        &self,
        domain: &str,
        record_type: RecordType,
        record_id: &str,
    ) -> Result<()> {
        let params = Params::new()
            .with("domain", domain)
            .with("recordId", record_id);
        self.client
            .request(&record_type.delete_action(), &params)
            .await
            .map(|_| ())
    }

    // ============ Shorthands ============

    pub async fn add_a_record(
        &self,
        domain: &str,
        hostname: &str,
        ip_address: &str,
        ttl: Option<u32>,
    ) -> Result<()> {
        let record = RecordData::A {
            hostname: hostname.to_string(),
            ip_address: ip_address.to_string(),
        };
        self.add_record(domain, &record, ttl).await
    }

    pub async fn add_aaaa_record(
        &self,
        domain: &str,
        hostname: &str,
        ipv6_address: &str,
        ttl: Option<u32>,
    ) -> Result<()> {
        let record = RecordData::Aaaa {
            hostname: hostname.to_string(),
            ipv6_address: ipv6_address.to_string(),
        };
        self.add_record(domain, &record, ttl).await
    }

    pub async fn add_cname_record(
        &self,
        domain: &str,
        alias: &str,
        target: &str,
        ttl: Option<u32>,
    ) -> Result<()> {
        let record = RecordData::Cname {
            alias: alias.to_string(),
            target: target.to_string(),
        };
        self.add_record(domain, &record, ttl).await
    }

    pub async fn add_mx_record(
        &self,
        domain: &str,
        hostname: &str,
        priority: u32,
        ttl: Option<u32>,
    ) -> Result<()> {
        let record = RecordData::Mx {
            hostname: hostname.to_string(),
            priority,
        };
        self.add_record(domain, &record, ttl).await
    }

    pub async fn add_txt_record(
        &self,
        domain: &str,
        hostname: &str,
        text: &str,
        ttl: Option<u32>,
    ) -> Result<()> {
        let record = RecordData::Txt {
            hostname: hostname.to_string(),
            text: text.to_string(),
        };
        self.add_record(domain, &record, ttl).await
    }
}
