use crate::config::{DEFAULT_PRICE_API_URL, DEFAULT_QUOTE_API_URL};
use crate::solana::tokens::SOL_MINT;

/// Jupiter endpoints and the reference asset used for quotes
#[derive(Debug, Clone)]
pub struct Config {
    /// URL for quote API
    pub quote_api_url: String,

    /// URL for price API
    pub price_api_url: String,

    /// SOL token address (wrapped)
    pub sol_token_address: String,

    /// Slippage tolerance sent with quotes
    pub slippage_bps: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            sol_token_address: SOL_MINT.to_string(),
            slippage_bps: 50,
        }
    }
}
