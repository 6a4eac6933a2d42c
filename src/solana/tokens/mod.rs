// Re-export submodules
pub mod constants;

// Re-export commonly used items
pub use constants::{
    CIRCULATING_SUPPLY, SOL_DECIMALS, SOL_MINT, TOTAL_SUPPLY, TWATAIR_DECIMALS, TWATAIR_MINT,
    TWATAIR_NAME, TWATAIR_SYMBOL,
};
