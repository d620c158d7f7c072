//! Error types for the kotae RAG handler.
//!
//! Every failure in a request maps onto one of four categories: missing
//! configuration, a failing search backend, a failing generation backend, or
//! a generation response with an unexpected shape. The remaining variants
//! cover the CLI and config-file layer.

use thiserror::Error;

/// Unified error type for kotae.
///
/// All fallible functions return `Result<T, AppError>`. Nothing is retried or
/// swallowed; an error aborts the whole request.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required configuration is missing or invalid (raised before any network call)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The search backend was unreachable or rejected the query
    #[error("Retrieval backend error: {0}")]
    Retrieval(String),

    /// The generation backend was unreachable or rejected the invocation
    #[error("Generation backend error: {0}")]
    Generation(String),

    /// The generation backend answered with a body we cannot interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
