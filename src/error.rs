//! Error types for Lektor.

use thiserror::Error;

/// Library-level error type for Lektor operations.
#[derive(Error, Debug)]
pub enum LektorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Stream aborted by the caller")]
    StreamAborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl LektorError {
    /// Whether the caller, not an upstream service, is at fault.
    ///
    /// Drives the 4xx/5xx split at the HTTP boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(self, LektorError::MalformedRequest(_))
    }
}

/// Result type alias for Lektor operations.
pub type Result<T> = std::result::Result<T, LektorError>;
