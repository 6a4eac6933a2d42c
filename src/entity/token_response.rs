use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::TokenSnapshot;

/// JSON body of `GET /api/token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    pub token: TokenPayload,
    pub timestamp: i64, // Unix millis
}

/// Token fields as they travel over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub trading_url: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub price_in_sol: f64,
    #[serde(default)]
    pub price_change_24h: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub total_supply: u64,
    #[serde(default)]
    pub circulating_supply: u64,
    #[serde(default)]
    pub lifetime_fees: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holders: Option<u64>,
}

impl TokenResponse {
    pub fn from_snapshot(snapshot: &TokenSnapshot, cached: bool) -> Self {
        Self {
            success: true,
            mock: snapshot.is_mock.then_some(true),
            cached: cached.then_some(true),
            token: TokenPayload {
                address: snapshot.address.clone(),
                symbol: snapshot.symbol.clone(),
                name: snapshot.name.clone(),
                trading_url: snapshot.trading_url.clone(),
                price: snapshot.price,
                price_in_sol: snapshot.price_in_sol,
                price_change_24h: snapshot.price_change_24h,
                market_cap: snapshot.market_cap,
                volume_24h: snapshot.volume_24h,
                total_supply: snapshot.total_supply,
                circulating_supply: snapshot.circulating_supply,
                lifetime_fees: snapshot.lifetime_fees,
                sol_price: snapshot.sol_price,
                holders: snapshot.holders,
            },
            timestamp: snapshot.fetched_at.timestamp_millis(),
        }
    }

    /// Rebuilds a snapshot; `received_at` is used when the timestamp is out of range.
    pub fn into_snapshot(self, received_at: DateTime<Utc>) -> TokenSnapshot {
        let token = self.token;

        TokenSnapshot {
            address: token.address,
            symbol: token.symbol,
            name: token.name,
            trading_url: token.trading_url,
            price: token.price.max(0.0),
            price_in_sol: token.price_in_sol.max(0.0),
            price_change_24h: token.price_change_24h,
            market_cap: token.market_cap.max(0.0),
            volume_24h: token.volume_24h.max(0.0),
            total_supply: token.total_supply,
            circulating_supply: token.circulating_supply,
            lifetime_fees: token.lifetime_fees.max(0.0),
            sol_price: token.sol_price,
            holders: token.holders,
            is_mock: self.mock.unwrap_or(false),
            fetched_at: DateTime::from_timestamp_millis(self.timestamp).unwrap_or(received_at),
        }
    }
}

/// JSON body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    pub token: String,
    pub health: String,
}
