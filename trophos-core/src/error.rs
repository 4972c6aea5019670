//! Error types for Trophos operations

/// Result type for Trophos operations
pub type Result<T> = std::result::Result<T, TrophosError>;

/// Error types for the Trophos pipeline
#[derive(Debug, thiserror::Error)]
pub enum TrophosError {
    /// Upstream model call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Response parsing error
    #[error("Parsing error: {0}")]
    Parsing(#[from] crate::parsing::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for TrophosError {
    fn from(s: String) -> Self {
        TrophosError::Other(s)
    }
}

impl From<&str> for TrophosError {
    fn from(s: &str) -> Self {
        TrophosError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for TrophosError {
    fn from(err: anyhow::Error) -> Self {
        TrophosError::Other(err.to_string())
    }
}
