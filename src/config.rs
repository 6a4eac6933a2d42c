//! Application configuration.
//!
//! Values come from the process environment (after `.env` is loaded by `main`).
//! Every key is optional: without `BAGS_API_KEY` the server stays in mock mode
//! for its whole lifetime.

use anyhow::{anyhow, Result};
use config::{Config as ConfigLoader, Environment};
use serde::Deserialize;
use std::time::Duration;

use crate::services::client_cache::{CLIENT_CACHE_TTL, DEFAULT_POLL_INTERVAL};
use crate::services::server_cache::SERVER_CACHE_TTL;
use crate::solana::jupiter::Config as JupiterConfig;
use crate::solana::tokens::{SOL_MINT, TWATAIR_DECIMALS};

pub const DEFAULT_BAGS_API_URL: &str = "https://public-api-v2.bags.fm/api/v1";
pub const DEFAULT_QUOTE_API_URL: &str = "https://lite-api.jup.ag/swap/v1";
pub const DEFAULT_PRICE_API_URL: &str = "https://lite-api.jup.ag/price/v2";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000/api";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Upstream credentials; absent means permanent mock mode
    #[serde(default)]
    pub bags_api_key: Option<String>,
    pub bags_api_url: String,
    pub quote_api_url: String,
    pub price_api_url: String,
    pub sol_token_address: String,
    pub token_decimals: u8,
    pub slippage_bps: u16,

    /// Value of `Access-Control-Allow-Origin`
    pub cors_origin: String,
    pub bind_address: String,
    pub port: u16,

    pub server_cache_ttl_secs: u64,
    pub client_cache_ttl_secs: u64,
    pub poll_interval_secs: u64,
    pub http_timeout_secs: u64,

    /// Where the client cache finds the local API
    pub api_base_url: String,
}

impl AppConfig {
    /// Loads configuration from environment variables
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::default().try_parsing(true))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        let loader = ConfigLoader::builder()
            .set_default("bags_api_url", DEFAULT_BAGS_API_URL)?
            .set_default("quote_api_url", DEFAULT_QUOTE_API_URL)?
            .set_default("price_api_url", DEFAULT_PRICE_API_URL)?
            .set_default("sol_token_address", SOL_MINT)?
            .set_default("token_decimals", TWATAIR_DECIMALS as i64)?
            .set_default("slippage_bps", 50_i64)?
            .set_default("cors_origin", "*")?
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("server_cache_ttl_secs", SERVER_CACHE_TTL.as_secs() as i64)?
            .set_default("client_cache_ttl_secs", CLIENT_CACHE_TTL.as_secs() as i64)?
            .set_default("poll_interval_secs", DEFAULT_POLL_INTERVAL.as_secs() as i64)?
            .set_default("http_timeout_secs", 10_i64)?
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .add_source(environment)
            .build()
            .map_err(|e| anyhow!("Failed to read configuration: {}", e))?;

        let mut config: AppConfig = loader
            .try_deserialize()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        // An empty key in .env is the same as no key
        config.bags_api_key = config
            .bags_api_key
            .take()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(config)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.bags_api_key.as_deref()
    }

    pub fn jupiter_config(&self) -> JupiterConfig {
        JupiterConfig {
            quote_api_url: self.quote_api_url.clone(),
            price_api_url: self.price_api_url.clone(),
            sol_token_address: self.sol_token_address.clone(),
            slippage_bps: self.slippage_bps,
        }
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn server_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.server_cache_ttl_secs)
    }

    pub fn client_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.client_cache_ttl_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
