//! CRM deal source.
//!
//! The only CRM call is one page of the deal list with a fixed property
//! set. No pagination beyond that page and no retries.

use std::time::Duration;

use async_trait::async_trait;
use dealmap_common::{DealMapError, DealMapResult, DealPage, DEAL_PROPERTIES};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::CrmConfig;

/// Anything that can hand out one page of raw deals.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch the deal list response body, untouched.
    async fn fetch_raw(&self) -> DealMapResult<Value>;

    /// Fetch and decode the deal list.
    async fn fetch_deals(&self) -> DealMapResult<DealPage> {
        let body = self.fetch_raw().await?;
        serde_json::from_value(body).map_err(|e| DealMapError::CrmDecode(e.to_string()))
    }
}

/// HubSpot deal list client.
pub struct HubSpotClient {
    client: Client,
    config: CrmConfig,
}

impl HubSpotClient {
    pub fn new(config: CrmConfig) -> DealMapResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DealMapError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn deals_url(&self) -> String {
        format!("{}/crm/v3/objects/deals", self.config.base_url)
    }

    /// Query string of the deal list request.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.config.limit.to_string()),
            ("archived", "false".to_string()),
            ("properties", DEAL_PROPERTIES.join(",")),
        ]
    }
}

#[async_trait]
impl DealSource for HubSpotClient {
    #[instrument(skip(self), fields(limit = self.config.limit))]
    async fn fetch_raw(&self) -> DealMapResult<Value> {
        let token = self
            .config
            .access_token
            .as_deref()
            .ok_or_else(|| DealMapError::MissingConfig("HUBSPOT_ACCESS_TOKEN".to_string()))?;

        let response = self
            .client
            .get(self.deals_url())
            .bearer_auth(token)
            .query(&self.query())
            .send()
            .await
            .map_err(|e| DealMapError::CrmRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DealMapError::CrmStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DealMapError::CrmDecode(e.to_string()))?;

        debug!(
            results = body["results"].as_array().map(Vec::len).unwrap_or(0),
            "Fetched deal page"
        );

        Ok(body)
    }
}

/// A fixed response body, for tests and offline demos.
pub struct StaticDealSource {
    body: Option<Value>,
}

impl StaticDealSource {
    pub fn new(body: Value) -> Self {
        Self { body: Some(body) }
    }

    /// A source whose every fetch fails.
    pub fn failing() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl DealSource for StaticDealSource {
    async fn fetch_raw(&self) -> DealMapResult<Value> {
        self.body
            .clone()
            .ok_or_else(|| DealMapError::CrmRequest("static source has no data".to_string()))
    }
}
