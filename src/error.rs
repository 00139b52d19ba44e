//! Error types for the store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not present (absent or already expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// The consumer of expired records has gone away
    #[error("Expiry sink closed")]
    SinkClosed,

    /// I/O failure while persisting expired records
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::SinkClosed | CacheError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            CacheError::NotFound(key) => key.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, CacheError>;
