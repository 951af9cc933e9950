//! HTTP error mapping.
//!
//! Every failure leaves the server as `{ "error": message }` with a status
//! code matching its kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::ErrorBody;
use thiserror::Error;
use tracing::warn;

use super::config::ConfigError;
use super::store::StoreError;

/// Request-level error returned by handlers.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid password")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            StoreError::Validation(msg) => ServerError::BadRequest(msg),
            StoreError::Conflict(msg) => ServerError::Conflict(msg),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Rejected bulk operation: invalid password");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Startup and serving errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(std::io::Error),

    /// Listener failed while serving
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_status_codes() {
        let not_found: ServerError = StoreError::NotFound { entity: "Zone", id: 3 }.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Zone 3 not found");

        let conflict: ServerError = StoreError::Conflict("busy".into()).into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid: ServerError = StoreError::Validation("bad".into()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }
}
