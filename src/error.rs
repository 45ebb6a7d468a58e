//! Error types for the component server
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Service Error Enum ==
/// Unified error type for the component server.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Requested component type is not in the catalog
    #[error("Component type '{component_type}' not found")]
    UnknownComponentType {
        component_type: String,
        available: Vec<String>,
    },

    /// No concurrency slot became free within the configured wait
    #[error("Server overloaded: no capacity freed within {}ms", .0.as_millis())]
    Overloaded(Duration),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ServiceError::UnknownComponentType { available, .. } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::with_available(message, available),
            ),
            ServiceError::Overloaded(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(message))
            }
            ServiceError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the component server.
pub type Result<T> = std::result::Result<T, ServiceError>;
