pub mod fees_service;
pub mod models;

pub use fees_service::{BagsFeesService, FeesService};
pub use models::LifetimeFeesResponse;
