use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

/// Create the HTTP client shared by all upstream services
pub fn create_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("twatair-token-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))
}
