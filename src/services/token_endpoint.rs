use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::entity::{HealthResponse, TokenResponse};

/// The local token API as seen by the client cache
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    async fn fetch_token(&self) -> Result<TokenResponse>;

    async fn fetch_health(&self) -> Result<HealthResponse>;
}

pub struct HttpTokenEndpoint {
    http_client: Client,
    base_url: String,
}

impl HttpTokenEndpoint {
    /// `base_url` points at the API root, e.g. `http://127.0.0.1:3000/api`
    pub fn new(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<D>(&self, path: &str) -> Result<D>
    where
        D: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| anyhow!("Request to {} failed: {}", url, e))?;

        if !response.status().is_success() {
            return Err(anyhow!("{} returned {}", url, response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse response from {}: {}", url, e))
    }
}

#[async_trait]
impl TokenEndpoint for HttpTokenEndpoint {
    async fn fetch_token(&self) -> Result<TokenResponse> {
        self.get_json("token").await
    }

    async fn fetch_health(&self) -> Result<HealthResponse> {
        self.get_json("health").await
    }
}
