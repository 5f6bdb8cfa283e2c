//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;
use axum::http::StatusCode;
use language_buddy_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Maps a port failure onto the `(StatusCode, String)` pair the handlers return.
///
/// Unexpected failures keep their detail in the logs only.
pub fn port_error_response(error: PortError) -> (StatusCode, String) {
    match error {
        PortError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
        PortError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
        PortError::MissingCredential(message) => (StatusCode::BAD_REQUEST, message),
        PortError::Unexpected(message) => {
            tracing::error!("Unexpected port failure: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            )
        }
    }
}
