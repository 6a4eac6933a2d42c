use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;

use crate::bags::models::LifetimeFeesResponse;

/// Token-economics provider: fees accrued by a token since launch
#[async_trait]
pub trait FeesService: Send + Sync {
    /// Lifetime fees for `mint`, in SOL
    async fn get_lifetime_fees(&self, mint: &str) -> Result<f64>;
}

/// Bags.fm public API client
pub struct BagsFeesService {
    http_client: Client,
    api_url: String,
    api_key: String,
}

impl BagsFeesService {
    pub fn new(http_client: Client, api_url: String, api_key: String) -> Self {
        Self {
            http_client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl FeesService for BagsFeesService {
    async fn get_lifetime_fees(&self, mint: &str) -> Result<f64> {
        let url = format!("{}/token-launch/lifetime-fees", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("mint", mint)])
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch lifetime fees from Bags API: {}", e);
                anyhow!("Failed to fetch lifetime fees: {}", e)
            })?;

        if !response.status().is_success() {
            return Err(anyhow!("Bags API error: {}", response.status()));
        }

        let body: LifetimeFeesResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse lifetime fees response: {}", e))?;

        let fees = body.fees_in_sol()?;
        debug!("Lifetime fees for {}: {} SOL", mint, fees);

        Ok(fees)
    }
}
