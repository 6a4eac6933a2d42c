//! Synthetic snapshots served when real data cannot be obtained.
//!
//! The shape is fixed; only the 24h change (and, for the client fallback, the
//! price-dependent figures) move with the injected random source.

use chrono::{DateTime, Utc};

use crate::entity::TokenSnapshot;
use crate::services::random::RandomSource;
use crate::solana::tokens::TOTAL_SUPPLY;

pub const MOCK_BASE_PRICE: f64 = 0.0000420;
pub const MOCK_MARKET_CAP: f64 = 420_690.0;
pub const MOCK_VOLUME_24H: f64 = 69_420.0;
pub const MOCK_HOLDERS: u64 = 1337;

/// Half-width of the randomized change, in percent
pub const MAX_MOCK_CHANGE_PCT: f64 = 10.0;

fn mock_base(now: DateTime<Utc>) -> TokenSnapshot {
    TokenSnapshot {
        price: MOCK_BASE_PRICE,
        market_cap: MOCK_MARKET_CAP,
        volume_24h: MOCK_VOLUME_24H,
        holders: Some(MOCK_HOLDERS),
        is_mock: true,
        ..TokenSnapshot::blank(now)
    }
}

/// Server-side stand-in: fixed figures, change drawn from ±10%
pub fn server_mock_snapshot(now: DateTime<Utc>, rng: &mut dyn RandomSource) -> TokenSnapshot {
    let change = rng.next_f64() * 2.0 * MAX_MOCK_CHANGE_PCT - MAX_MOCK_CHANGE_PCT;

    TokenSnapshot {
        price_change_24h: change,
        ..mock_base(now)
    }
}

/// Client-side stand-in: the price itself drifts with the random change
pub fn client_fallback_snapshot(now: DateTime<Utc>, rng: &mut dyn RandomSource) -> TokenSnapshot {
    let change = (rng.next_f64() - 0.5) * 2.0 * MAX_MOCK_CHANGE_PCT;
    let price = MOCK_BASE_PRICE * (1.0 + change / 100.0);
    let volume = (rng.next_f64() * 100_000.0).floor() + 50_000.0;

    TokenSnapshot {
        price,
        price_change_24h: change,
        market_cap: (price * TOTAL_SUPPLY as f64).floor(),
        volume_24h: volume,
        ..mock_base(now)
    }
}
