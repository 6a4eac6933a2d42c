use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::entity::{ApiError, HealthResponse};
use crate::router::AppState;

/// GET /api/token
pub async fn token_handler(
    method: Method,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    // axum routes HEAD to GET handlers
    if method == Method::HEAD {
        return Err(ApiError::MethodNotAllowed);
    }

    let response = state.interactor.get_token().await;
    let body = serde_json::to_value(&response)?;

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// OPTIONS /api/token
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/token
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}

/// GET /api/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.interactor.health())
}
