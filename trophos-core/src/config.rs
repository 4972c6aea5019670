//! Configuration types for the Trophos pipeline

use serde::{Deserialize, Serialize};

/// Generation settings for the Gemini model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model name (e.g. "gemini-1.5-pro")
    pub model_name: String,

    /// Sampling temperature (0.0-2.0)
    pub temperature: f32,

    /// Top-k sampling cutoff
    pub top_k: u32,

    /// Nucleus sampling cutoff
    pub top_p: f32,

    /// Maximum tokens the model may generate
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model_name: "gemini-1.5-pro".to_string(),
            temperature: 1.0,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_config_defaults() {
        let config = GeminiConfig::default();
        assert_eq!(config.model_name, "gemini-1.5-pro");
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 8192);
    }

    #[test]
    fn test_temperature_clamping() {
        let config = GeminiConfig::new().with_temperature(5.0);
        assert_eq!(config.temperature, 2.0);

        let config = GeminiConfig::new().with_temperature(-1.0);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeminiConfig::new()
            .with_model_name("gemini-1.5-flash")
            .with_max_output_tokens(1024);
        assert_eq!(config.model_name, "gemini-1.5-flash");
        assert_eq!(config.max_output_tokens, 1024);
    }
}
