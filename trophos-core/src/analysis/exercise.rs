//! Exercise analysis: response parsing, analysis, and correction

use std::sync::Arc;

use serde_json::Value;

use crate::analysis::entities::ExerciseAnalysisResult;
use crate::analysis::{number_field, string_field};
use crate::error::Result;
use crate::llm::LlmClient;
use crate::parsing::{extract_json_from_text, parse_json_safely, preview};

const VALID_INTENSITIES: [&str; 4] = ["low", "medium", "high", "unknown"];

/// Parser for exercise analysis responses. Never fails.
#[derive(Debug, Clone, Default)]
pub struct ExerciseResponseParser;

impl ExerciseResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw model output into an [`ExerciseAnalysisResult`].
    pub fn parse(&self, response_text: &str) -> ExerciseAnalysisResult {
        let Some(candidate) = extract_json_from_text(response_text) else {
            tracing::warn!("no JSON found in exercise analysis response");
            return ExerciseAnalysisResult::failure(format!(
                "Failed to parse response: {}...",
                preview(response_text)
            ));
        };

        match parse_json_safely(&candidate) {
            Ok(data) => self.from_value(&data),
            Err(e) => {
                tracing::error!(error = %e, "error parsing exercise analysis response");
                ExerciseAnalysisResult::failure(format!("Failed to parse response: {}", e))
            }
        }
    }

    fn from_value(&self, data: &Value) -> ExerciseAnalysisResult {
        let exercise_type = string_field(data.get("exercise_type"), "unknown");
        let calories_burned = number_field(data.get("calories_burned"));
        let duration = string_field(data.get("duration"), "unknown");
        let intensity = normalize_intensity(&string_field(data.get("intensity"), "unknown"));
        let met_value = number_field(data.get("met_value"));
        let error = data
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);

        ExerciseAnalysisResult::new(
            exercise_type,
            calories_burned,
            duration,
            intensity,
            met_value,
            error,
        )
    }
}

/// Lowercase the model's intensity label and collapse anything off the
/// known scale to "unknown".
fn normalize_intensity(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    if VALID_INTENSITIES.contains(&lowered.as_str()) {
        lowered
    } else {
        "unknown".to_string()
    }
}

/// Model-backed exercise analysis with correction support.
pub struct ExerciseAnalysisService {
    client: Arc<dyn LlmClient>,
    parser: ExerciseResponseParser,
}

impl ExerciseAnalysisService {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            parser: ExerciseResponseParser::new(),
        }
    }

    /// Analyze an exercise description. Health metrics sharpen the calorie
    /// estimate when present.
    pub async fn analyze(
        &self,
        description: &str,
        user_weight_kg: Option<f64>,
    ) -> Result<ExerciseAnalysisResult> {
        tracing::info!(preview = %preview(description), "analyzing exercise description");
        let prompt = self.analysis_prompt(description, user_weight_kg);
        let response = self.client.invoke(&prompt).await?;
        Ok(self.parser.parse(&response))
    }

    /// Re-run an analysis with user feedback. The corrected result keeps
    /// the previous result's id.
    pub async fn correct(
        &self,
        previous: &ExerciseAnalysisResult,
        user_comment: &str,
    ) -> Result<ExerciseAnalysisResult> {
        let prompt = self.correction_prompt(previous, user_comment)?;
        let response = self.client.invoke(&prompt).await?;
        let mut corrected = self.parser.parse(&response);
        corrected.id = previous.id;
        Ok(corrected)
    }

    fn analysis_prompt(&self, description: &str, user_weight_kg: Option<f64>) -> String {
        let weight = user_weight_kg
            .map(|w| format!("The user weighs {w} kg."))
            .unwrap_or_else(|| "Assume average adult metrics.".to_string());
        format!(
            "Analyze this exercise and respond with a JSON object holding \
             \"exercise_type\", \"calories_burned\", \"duration\", \
             \"intensity\" (Low/Medium/High) and \"met_value\".\n\n\
             Exercise description: {description}\n{weight}"
        )
    }

    fn correction_prompt(
        &self,
        previous: &ExerciseAnalysisResult,
        user_comment: &str,
    ) -> Result<String> {
        let previous_json = serde_json::to_string_pretty(previous)?;
        Ok(format!(
            "Here is a previous exercise analysis:\n{previous_json}\n\n\
             The user corrected it with: \"{user_comment}\"\n\
             Return the corrected analysis as a JSON object with the same structure."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_response() {
        let parser = ExerciseResponseParser::new();
        let response = r#"{
            "exercise_type": "Running",
            "calories_burned": 350,
            "duration": "30 minutes",
            "intensity": "High",
            "met_value": 9.8
        }"#;
        let result = parser.parse(response);
        assert_eq!(result.exercise_type, "Running");
        assert_eq!(result.calories_burned, 350.0);
        assert_eq!(result.duration, "30 minutes");
        assert_eq!(result.intensity, "high");
        assert_eq!(result.met_value, 9.8);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_normalizes_bogus_intensity() {
        let parser = ExerciseResponseParser::new();
        let result = parser.parse(r#"{"exercise_type": "Yoga", "intensity": "extreme"}"#);
        assert_eq!(result.intensity, "unknown");
    }

    #[test]
    fn test_parse_tolerates_string_numbers() {
        let parser = ExerciseResponseParser::new();
        let result =
            parser.parse(r#"{"exercise_type": "Swimming", "calories_burned": "420"}"#);
        assert_eq!(result.calories_burned, 420.0);
    }

    #[test]
    fn test_parse_numeric_duration_becomes_string() {
        let parser = ExerciseResponseParser::new();
        let result = parser.parse(r#"{"exercise_type": "Rowing", "duration": 45}"#);
        assert_eq!(result.duration, "45");
    }

    #[test]
    fn test_parse_passes_through_model_error_field() {
        let parser = ExerciseResponseParser::new();
        let response = r#"{"error": "Error in describing exercise", "exercise_type": "unknown",
                           "calories_burned": 0, "duration": "unknown", "intensity": "unknown",
                           "met_value": 0.0}"#;
        let result = parser.parse(response);
        assert_eq!(result.error.as_deref(), Some("Error in describing exercise"));
        assert_eq!(result.exercise_type, "unknown");
    }

    #[test]
    fn test_parse_no_json_yields_failure_result() {
        let parser = ExerciseResponseParser::new();
        let result = parser.parse("I went for a nice walk");
        assert_eq!(result.exercise_type, "unknown");
        assert!(result
            .error
            .unwrap()
            .starts_with("Failed to parse response: I went for a nice walk"));
    }

    #[test]
    fn test_parse_repairs_malformed_response() {
        let parser = ExerciseResponseParser::new();
        let result = parser.parse("{'exercise_type': 'Cycling', 'calories_burned': 280,}");
        assert_eq!(result.exercise_type, "Cycling");
        assert_eq!(result.calories_burned, 280.0);
        assert!(result.error.is_none());
    }
}
