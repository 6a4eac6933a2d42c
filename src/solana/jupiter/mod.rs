// src/solana/jupiter/mod.rs
pub mod config;
pub mod models;
pub mod price_service;
pub mod quote_service;

// Реэкспорт для удобства использования
pub use models::{JupiterPriceResponse, QuoteResponse};

pub use config::Config;
pub use price_service::{JupiterPriceService, PriceService};
pub use quote_service::{JupiterQuoteService, QuoteService};
