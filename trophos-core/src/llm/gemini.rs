//! Gemini LLM client implementation

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::{Result, TrophosError};
use crate::llm::{LlmClient, ModelInfo};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini text/vision client for the generateContent endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    config: GeminiConfig,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `config` - Model and generation settings
    pub fn new(api_key: impl Into<String>, config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            config,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create with a custom base URL (for proxies or compatible APIs).
    pub fn with_base_url(
        api_key: impl Into<String>,
        config: GeminiConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            config,
            base_url: base_url.into(),
        }
    }

    /// Create from environment variables.
    ///
    /// Reads from:
    /// - `GEMINI_API_KEY` - API key (required)
    /// - `GEMINI_MODEL` - Model name (optional, defaults to "gemini-1.5-pro")
    ///
    /// # Errors
    ///
    /// Returns an error if GEMINI_API_KEY is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            TrophosError::Configuration("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        let mut config = GeminiConfig::default();
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model_name = model;
        }

        Ok(Self::new(api_key, config))
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.config.model_name
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn generate(&self, parts: Vec<Part>) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: WireGenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.config.model_name, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await.map_err(|e| {
            tracing::error!(error = %e, "Gemini API request failed");
            TrophosError::Llm(format!("Gemini API request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Gemini API returned error");
            return Err(TrophosError::Llm(format!(
                "Gemini API error ({}): {}",
                status, text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            TrophosError::Llm(format!("Failed to decode Gemini response: {}", e))
        })?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| TrophosError::Llm("No response text generated".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct WireGenerationConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.generate(vec![Part::Text {
            text: prompt.to_string(),
        }])
        .await
    }

    async fn invoke_with_image(&self, prompt: &str, image: &[u8]) -> Result<String> {
        let encoded = general_purpose::STANDARD.encode(image);
        self.generate(vec![
            Part::Text {
                text: prompt.to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/jpeg".to_string(),
                    data: encoded,
                },
            },
        ])
        .await
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "gemini".to_string(),
            model_name: self.config.model_name.clone(),
        }
    }
}
