//! ipinfo.io lookups
//!
//! An empty target asks the service about the caller's own public address.

use crate::backend::{Resolver, SelfIpRecord};
use crate::config::IpInfoConfig;
use crate::error::{LocipError, Result};
use reqwest::Client;

/// Client for the ipinfo.io JSON endpoint
pub struct IpInfoClient {
    client: Client,
    base_url: String,
}

impl IpInfoClient {
    pub fn new(config: &IpInfoConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("locip/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LocipError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// `<base>json` for the caller, `<base><target>/json` otherwise
    pub fn url_for(&self, target: &str) -> String {
        let mut url = self.base_url.clone();
        if !url.ends_with('/') {
            url.push('/');
        }
        if !target.is_empty() {
            url.push_str(target);
            url.push('/');
        }
        url.push_str("json");
        url
    }
}

impl Resolver for IpInfoClient {
    type Record = SelfIpRecord;

    fn name(&self) -> &str {
        "ipinfo.io"
    }

    async fn resolve(&self, target: &str) -> Result<SelfIpRecord> {
        let url = self.url_for(target);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let record = response.json::<SelfIpRecord>().await?;

        Ok(record)
    }
}
