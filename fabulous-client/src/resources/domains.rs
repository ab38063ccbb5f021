use std::ops::ControlFlow;

use crate::client::FabulousClient;
use crate::error::Result;
use crate::pagination::Paginator;
use crate::response::ParsedResponse;
use crate::types::{DomainInfo, DomainSummary, Params, RegisterOptions};

const LIST_DOMAINS: &str = "listDomains";

/// Domain portfolio operations.
pub struct Domains<'c> {
    client: &'c FabulousClient,
}

impl<'c> Domains<'c> {
    pub(crate) fn new(client: &'c FabulousClient) -> Self {
        Self { client }
    }

    fn listing(&self) -> Paginator<'c> {
        self.client.paginate(LIST_DOMAINS, Params::new())
    }

    // ============ Listing ============

    /// A single page of the portfolio.
    pub async fn list_page(&self, page: u32) -> Result<Vec<DomainSummary>> {
        let params = Params::new().with("page", page);
        let response = self.client.request(LIST_DOMAINS, &params).await?;
        Ok(response.domains().to_vec())
    }

    /// Every domain across all pages, in page order.
    pub async fn all(&self) -> Result<Vec<DomainSummary>> {
        self.listing().collect(|r| r.domains().to_vec()).await
    }

    /// Stream the portfolio page by page without accumulating it.
    pub async fn for_each_page<F>(&self, handler: F) -> Result<()>
    where
        F: FnMut(&ParsedResponse, u32) -> ControlFlow<()>,
    {
        self.listing().for_each_page(handler).await
    }

    // ============ Lookup ============

    /// `Some(true)` when the name can be registered; `None` if the reply
    /// carried no availability element.
    pub async fn check(&self, domain: &str) -> Result<Option<bool>> {
        let response = self
            .client
            .request("checkDomain", &Params::new().with("domain", domain))
            .await?;
        Ok(response.available())
    }

    pub async fn info(&self, domain: &str) -> Result<Option<DomainInfo>> {
        let response = self
            .client
            .request("domainInfo", &Params::new().with("domain", domain))
            .await?;
        Ok(response.domain_info().cloned())
    }

    /// Nameservers as reported by [`info`](Self::info).
    pub async fn nameservers(&self, domain: &str) -> Result<Option<Vec<String>>> {
        Ok(self.info(domain).await?.and_then(|info| info.nameservers))
    }

    // ============ Lifecycle ============

    pub async fn register(&self, domain: &str, options: &RegisterOptions) -> Result<()> {
        let params = Params::new()
            .with("domain", domain)
            .with("years", options.years)
            .with("whoisPrivacy", options.whois_privacy)
            .with("autoRenew", options.auto_renew)
            .with_nameservers(&options.nameservers);
        self.acknowledge("registerDomain", &params).await
    }

    pub async fn renew(&self, domain: &str, years: u32) -> Result<()> {
        let params = Params::new().with("domain", domain).with("years", years);
        self.acknowledge("renewDomain", &params).await
    }

    pub async fn transfer_in(&self, domain: &str, auth_code: &str) -> Result<()> {
        let params = Params::new()
            .with("domain", domain)
            .with("authCode", auth_code);
        self.acknowledge("transferIn", &params).await
    }

    // ============ Settings ============

    /// Replace the delegation; servers are sent as `ns1`, `ns2`, ...
    pub async fn set_nameservers<S: AsRef<str>>(
        &self,
        domain: &str,
        nameservers: &[S],
    ) -> Result<()> {
        let params = Params::new()
            .with("domain", domain)
            .with_nameservers(nameservers);
        self.acknowledge("setNameServers", &params).await
    }

    pub async fn lock(&self, domain: &str) -> Result<()> {
        self.acknowledge("lockDomain", &Params::new().with("domain", domain))
            .await
    }

    pub async fn unlock(&self, domain: &str) -> Result<()> {
        self.acknowledge("unlockDomain", &Params::new().with("domain", domain))
            .await
    }

    pub async fn set_auto_renew(&self, domain: &str, enabled: bool) -> Result<()> {
        let params = Params::new()
            .with("domain", domain)
            .with("autoRenew", enabled);
        self.acknowledge("setAutoRenew", &params).await
    }

    pub async fn enable_whois_privacy(&self, domain: &str) -> Result<()> {
        self.acknowledge("enableWhoisPrivacy", &Params::new().with("domain", domain))
            .await
    }

    pub async fn disable_whois_privacy(&self, domain: &str) -> Result<()> {
        self.acknowledge("disableWhoisPrivacy", &Params::new().with("domain", domain))
            .await
    }

    /// Convenience over the two privacy actions.
    pub async fn set_whois_privacy(&self, domain: &str, enabled: bool) -> Result<()> {
        if enabled {
            self.enable_whois_privacy(domain).await
        } else {
            self.disable_whois_privacy(domain).await
        }
    }

    async fn acknowledge(&self, action: &str, params: &Params) -> Result<()> {
        self.client.request(action, params).await.map(|_| ())
    }
}
