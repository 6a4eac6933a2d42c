use crate::solana::tokens::constants::{BAGS_TRADING_URL_BASE, SOL_DECIMALS};

// Constants for conversion
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Convert amount with decimals to token units
pub fn convert_to_token_amount(amount: f64, decimals: u8) -> u64 {
    (amount * 10_f64.powi(decimals as i32)) as u64
}

/// Convert token units back into a whole-token amount
pub fn convert_from_token_amount(units: u64, decimals: u8) -> f64 {
    units as f64 / 10_f64.powi(decimals as i32)
}

/// One whole SOL in lamports, the input amount for reference quotes
pub fn one_sol_in_lamports() -> u64 {
    convert_to_token_amount(1.0, SOL_DECIMALS)
}

/// Bags.fm trading page for a mint
pub fn trading_url(mint: &str) -> String {
    format!("{}/{}", BAGS_TRADING_URL_BASE, mint)
}
