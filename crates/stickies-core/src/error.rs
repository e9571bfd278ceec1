//! Error types for stickies-core

use thiserror::Error;

/// Result type alias using the core service error
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Errors reported by the remote note service adapter.
///
/// The collection controller treats every variant identically: the attempted
/// state transition is aborted and the message is surfaced to the user.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON payload
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The API accepted the request but reported an error
    #[error("Data API error: {0}")]
    Api(String),

    /// Note not found on the server
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Response decoded but failed field validation
    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),

    /// Client construction rejected its configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
