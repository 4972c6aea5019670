//! Core parser trait and error types

use thiserror::Error;

/// Maximum number of characters of offending input carried in diagnostics.
pub const PREVIEW_CHARS: usize = 100;

/// Error type for parsing operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Candidate was empty before any decode attempt
    #[error("Empty JSON string")]
    EmptyInput,

    /// No object or array span could be located in the raw text
    #[error("No JSON found in text")]
    NoJsonFound,

    /// Both the raw and the repaired decode attempts failed
    #[error("Failed to parse JSON: {message}")]
    MalformedJson {
        message: String,
        /// Prefix of the unrepaired candidate, capped at [`PREVIEW_CHARS`]
        preview: String,
    },
}

impl ParseError {
    /// Build a [`ParseError::MalformedJson`] from a decode error and the
    /// original (unrepaired) candidate text.
    pub fn malformed(message: impl Into<String>, candidate: &str) -> Self {
        ParseError::MalformedJson {
            message: message.into(),
            preview: preview(candidate),
        }
    }
}

/// Truncate text to a bounded diagnostic preview, on char boundaries.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Trait for output parsers
pub trait OutputParser: Send + Sync {
    /// The output type produced by this parser
    type Output;

    /// Parse the raw output string
    fn parse(&self, raw: &str) -> ParseResult<Self::Output>;

    /// Check if this parser can handle the input
    fn can_parse(&self, raw: &str) -> bool;

    /// Get the parser name for debugging
    fn name(&self) -> &'static str;
}

/// Configuration for parser behavior
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Attempt to repair malformed input
    pub attempt_repair: bool,
    /// Locate the candidate inside fences/prose before decoding
    pub extract_candidate: bool,
    /// Trim whitespace
    pub trim_whitespace: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            attempt_repair: true,
            extract_candidate: true,
            trim_whitespace: true,
        }
    }
}

impl ParserConfig {
    /// Create a strict config (no repair attempts)
    pub fn strict() -> Self {
        Self {
            attempt_repair: false,
            extract_candidate: true,
            trim_whitespace: true,
        }
    }

    /// Create a lenient config (maximum repair)
    pub fn lenient() -> Self {
        Self {
            attempt_repair: true,
            extract_candidate: true,
            trim_whitespace: true,
        }
    }
}
