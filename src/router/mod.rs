use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use log::warn;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::interactor::token_interactor::{TokenInteractor, HEALTH_ENDPOINT, TOKEN_ENDPOINT};

pub mod handlers;

use handlers::{health_handler, method_not_allowed_handler, preflight_handler, token_handler};

#[derive(Clone)]
pub struct AppState {
    pub interactor: Arc<dyn TokenInteractor>,
}

/// Builds the HTTP API: `/api/token` and `/api/health` behind CORS
pub fn create_router(interactor: Arc<dyn TokenInteractor>, cors_origin: &str) -> Router {
    let state = AppState { interactor };

    Router::new()
        .route(
            TOKEN_ENDPOINT,
            get(token_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(HEALTH_ENDPOINT, get(health_handler))
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

fn cors_layer(cors_origin: &str) -> CorsLayer {
    let allow_origin = if cors_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(cors_origin.trim()) {
            Ok(origin) => AllowOrigin::exact(origin),
            Err(e) => {
                warn!("Invalid CORS origin '{}', allowing any: {}", cors_origin, e);
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}
