//! Token metrics derived from upstream data points.

use crate::solana::tokens::TOTAL_SUPPLY;
use crate::solana::utils::convert_from_token_amount;

/// Lifetime fees in USD times this factor give the volume estimate.
/// Order-of-magnitude only; there is no volume feed upstream.
pub const VOLUME_FEE_MULTIPLIER: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedPrice {
    pub tokens_per_sol: f64,
    pub price_in_sol: f64,
    pub price: f64, // USD
}

/// Price from a 1 SOL -> token quote. `None` or a zero quote yields all zeros.
pub fn derive_price(quote_out_amount: Option<u64>, token_decimals: u8, sol_price: f64) -> DerivedPrice {
    let tokens_per_sol = quote_out_amount
        .map(|out| convert_from_token_amount(out, token_decimals))
        .unwrap_or(0.0);

    if tokens_per_sol <= 0.0 {
        return DerivedPrice::default();
    }

    let price_in_sol = 1.0 / tokens_per_sol;

    DerivedPrice {
        tokens_per_sol,
        price_in_sol,
        price: price_in_sol * sol_price.max(0.0),
    }
}

/// Percent change against the previous sample, 0 without a usable one
pub fn derive_change(previous: Option<f64>, new_price: f64) -> f64 {
    match previous {
        Some(previous) if previous > 0.0 && new_price > 0.0 => {
            (new_price - previous) / previous * 100.0
        }
        _ => 0.0,
    }
}

pub fn market_cap(price: f64) -> f64 {
    price * TOTAL_SUPPLY as f64
}

pub fn estimate_volume(lifetime_fees_sol: f64, sol_price: f64) -> f64 {
    (lifetime_fees_sol * sol_price * VOLUME_FEE_MULTIPLIER).max(0.0)
}
