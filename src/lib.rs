pub mod bags;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod services;
pub mod solana;
pub mod utils;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items
pub use config::AppConfig;
pub use di::ServiceContainer;
pub use entity::{ApiError, HealthResponse, TokenResponse, TokenSnapshot};
pub use interactor::{TokenInteractor, TokenInteractorImpl};
pub use router::create_router;
pub use services::{ClientTokenCache, ServerTokenCache, Subscription};
