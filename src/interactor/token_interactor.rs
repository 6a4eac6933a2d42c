use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{Endpoints, HealthResponse, TokenResponse};
use crate::services::{Clock, ServerTokenCache};

pub const TOKEN_ENDPOINT: &str = "/api/token";
pub const HEALTH_ENDPOINT: &str = "/api/health";

#[async_trait]
pub trait TokenInteractor: Send + Sync {
    async fn get_token(&self) -> TokenResponse;

    fn health(&self) -> HealthResponse;
}

pub struct TokenInteractorImpl {
    cache: Arc<ServerTokenCache>,
    clock: Arc<dyn Clock>,
}

impl TokenInteractorImpl {
    pub fn new(cache: Arc<ServerTokenCache>, clock: Arc<dyn Clock>) -> Self {
        Self { cache, clock }
    }
}

#[async_trait]
impl TokenInteractor for TokenInteractorImpl {
    async fn get_token(&self) -> TokenResponse {
        let served = self.cache.get_snapshot().await;
        TokenResponse::from_snapshot(&served.snapshot, served.is_cached())
    }

    fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            timestamp: self.clock.now().timestamp_millis(),
            version: crate::VERSION.to_string(),
            endpoints: Endpoints {
                token: TOKEN_ENDPOINT.to_string(),
                health: HEALTH_ENDPOINT.to_string(),
            },
        }
    }
}
