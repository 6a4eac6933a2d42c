use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::solana::tokens::{CIRCULATING_SUPPLY, TOTAL_SUPPLY, TWATAIR_MINT, TWATAIR_NAME, TWATAIR_SYMBOL};
use crate::solana::utils::trading_url;

/// One complete set of token metrics as of `fetched_at`.
///
/// Snapshots are immutable once built; caches replace the shared `Arc` rather
/// than editing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub address: String,          // Token mint
    pub symbol: String,           // Ticker shown in the UI
    pub name: String,             // Display name
    pub trading_url: String,      // Where to buy
    pub price: f64,               // USD, 0 when undeterminable
    pub price_in_sol: f64,        // SOL per token
    pub price_change_24h: f64,    // Percent, 0 without a prior sample
    pub market_cap: f64,          // USD
    pub volume_24h: f64,          // USD, estimated
    pub total_supply: u64,        // Whole tokens
    pub circulating_supply: u64,  // Whole tokens
    pub lifetime_fees: f64,       // SOL
    pub sol_price: Option<f64>,   // USD per SOL when known
    pub holders: Option<u64>,     // Only reported by synthetic data
    pub is_mock: bool,            // Synthetic data was substituted
    pub fetched_at: DateTime<Utc>, // Retrieval time
}

impl TokenSnapshot {
    /// Snapshot carrying only the fixed token identity; metric fields are zero.
    pub fn blank(fetched_at: DateTime<Utc>) -> Self {
        Self {
            address: TWATAIR_MINT.to_string(),
            symbol: TWATAIR_SYMBOL.to_string(),
            name: TWATAIR_NAME.to_string(),
            trading_url: trading_url(TWATAIR_MINT),
            price: 0.0,
            price_in_sol: 0.0,
            price_change_24h: 0.0,
            market_cap: 0.0,
            volume_24h: 0.0,
            total_supply: TOTAL_SUPPLY,
            circulating_supply: CIRCULATING_SUPPLY,
            lifetime_fees: 0.0,
            sol_price: None,
            holders: None,
            is_mock: false,
            fetched_at,
        }
    }

    pub fn has_usd_price(&self) -> bool {
        self.price > 0.0
    }
}
