// Re-export everything from submodules
pub mod client;
pub mod tokens;
pub mod utils;
pub mod jupiter;

// Re-export commonly used items
pub use client::create_http_client;
pub use tokens::constants::{SOL_MINT, TWATAIR_MINT};
pub use utils::{lamports_to_sol, trading_url};
