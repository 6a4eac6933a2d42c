mod api_error;
mod token_response;
mod token_snapshot;

pub use api_error::ApiError;
pub use token_response::{Endpoints, HealthResponse, TokenPayload, TokenResponse};
pub use token_snapshot::TokenSnapshot;
