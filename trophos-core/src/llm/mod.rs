//! The model-call boundary
//!
//! The analysis services treat text generation as an opaque exchange: a
//! prompt goes in, raw text comes out. Everything downstream of that text
//! (extraction, repair, decoding) lives in [`crate::parsing`]; everything
//! upstream (model choice, transport, retries) lives behind [`LlmClient`].
//! A client is constructed once at process start and injected read-only
//! into the services that consume it.

use async_trait::async_trait;

use crate::error::{Result, TrophosError};

pub mod gemini;

pub use gemini::GeminiClient;

/// Trait for text-generation client implementations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a text prompt and return the raw response text.
    ///
    /// No structure is guaranteed for the returned text; callers run it
    /// through the parsing pipeline.
    async fn invoke(&self, prompt: &str) -> Result<String>;

    /// Send a prompt alongside an image payload.
    async fn invoke_with_image(&self, _prompt: &str, _image: &[u8]) -> Result<String> {
        Err(TrophosError::Configuration(
            "Image input not supported by this client".to_string(),
        ))
    }

    /// Get model information
    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "unknown".to_string(),
            model_name: "unknown".to_string(),
        }
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub provider: String,
    pub model_name: String,
}

/// Stub client that always fails.
///
/// Lets the services compile and wire up in tests without a configured
/// model; any invocation reports the missing configuration.
pub struct StubLlmClient;

#[async_trait]
impl LlmClient for StubLlmClient {
    async fn invoke(&self, _prompt: &str) -> Result<String> {
        Err(TrophosError::Configuration(
            "LLM client not configured. Implement the LlmClient trait for your model".to_string(),
        ))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "stub".to_string(),
            model_name: "none".to_string(),
        }
    }
}
