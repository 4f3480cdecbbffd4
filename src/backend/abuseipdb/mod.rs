//! AbuseIPDB lookups
//!
//! Wraps the `/api/v2/check` endpoint. The API key is required up front; without
//! one no check can succeed for the rest of the run.

use crate::backend::{AbuseRecord, Resolver};
use crate::config::AbuseIpDbConfig;
use crate::error::{HTTP_ERROR_BODY_LIMIT, LocipError, Result};
use reqwest::{Client, Request, header};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct CheckResponse {
    data: AbuseRecord,
}

/// Client for the AbuseIPDB check endpoint
pub struct AbuseIpDbClient {
    client: Client,
    endpoint: String,
    api_key: String,
    max_age_days: i64,
    timeout: Duration,
}

impl AbuseIpDbClient {
    /// Create a client; an empty key is rejected as a missing credential
    pub fn new(config: &AbuseIpDbConfig, api_key: String, max_age_days: i64) -> Result<Self> {
        if api_key.is_empty() {
            return Err(LocipError::MissingCredential(config.key_env.clone()));
        }

        let client = Client::builder()
            .user_agent(format!("locip/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LocipError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            max_age_days,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    fn request(&self, ip: &str) -> Result<Request> {
        let max_age = self.max_age_days.to_string();
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("ipAddress", ip), ("maxAgeInDays", max_age.as_str())])
            .header("Key", &self.api_key)
            .header(header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .build()?;
        Ok(request)
    }
}

impl Resolver for AbuseIpDbClient {
    type Record = AbuseRecord;

    fn name(&self) -> &str {
        "AbuseIPDB"
    }

    async fn resolve(&self, target: &str) -> Result<AbuseRecord> {
        let request = self.request(target)?;
        log::debug!("GET {}", request.url().path());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let shown = &body[..body.len().min(HTTP_ERROR_BODY_LIMIT)];
            return Err(LocipError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(shown).into_owned(),
            });
        }

        let parsed: CheckResponse =
            serde_json::from_slice(&body).map_err(|e| LocipError::Decode(e.to_string()))?;

        Ok(parsed.data)
    }
}
