//! Food analysis: response parsing and the model-backed service

use std::sync::Arc;

use serde_json::Value;

use crate::analysis::entities::{FoodAnalysisResult, Ingredient, NutritionInfo};
use crate::analysis::number_field;
use crate::error::Result;
use crate::llm::LlmClient;
use crate::parsing::{extract_json_from_text, parse_json_safely, preview};

/// Parser for food analysis responses.
///
/// Never fails: anything unrecoverable becomes a result whose `error` field
/// is set and whose domain fields hold their defaults.
#[derive(Debug, Clone, Default)]
pub struct FoodResponseParser;

impl FoodResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw model output into a [`FoodAnalysisResult`].
    ///
    /// `default_food_name` is used whenever the response does not name the
    /// food, including total parse failures.
    pub fn parse(&self, response_text: &str, default_food_name: &str) -> FoodAnalysisResult {
        let Some(candidate) = extract_json_from_text(response_text) else {
            tracing::warn!("no JSON found in food analysis response");
            return FoodAnalysisResult::failure(
                default_food_name,
                format!("Failed to parse response: {}...", preview(response_text)),
            );
        };

        match parse_json_safely(&candidate) {
            Ok(data) => self.from_value(&data, default_food_name),
            Err(e) => {
                tracing::error!(error = %e, "error parsing food analysis response");
                FoodAnalysisResult::failure(
                    default_food_name,
                    format!("Failed to parse response: {}", e),
                )
            }
        }
    }

    /// Walk the decoded value into the domain type. Every expected key may
    /// be absent or mistyped; absence always maps to the field default.
    fn from_value(&self, data: &Value, default_food_name: &str) -> FoodAnalysisResult {
        let food_name = data
            .get("food_name")
            .and_then(Value::as_str)
            .unwrap_or(default_food_name)
            .to_string();

        let ingredients = data
            .get("ingredients")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|obj| Ingredient {
                        name: obj
                            .get("name")
                            .and_then(Value::as_str)
                            .unwrap_or("Unknown ingredient")
                            .to_string(),
                        servings: number_field(obj.get("servings")),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let nutrition_info = data
            .get("nutrition_info")
            .and_then(Value::as_object)
            .map(|obj| NutritionInfo {
                calories: number_field(obj.get("calories")),
                protein: number_field(obj.get("protein")),
                carbs: number_field(obj.get("carbs")),
                fat: number_field(obj.get("fat")),
                sodium: number_field(obj.get("sodium")),
                fiber: number_field(obj.get("fiber")),
                sugar: number_field(obj.get("sugar")),
            })
            .unwrap_or_default();

        let warnings = data
            .get("warnings")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let error = data
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut result =
            FoodAnalysisResult::new(food_name, ingredients, nutrition_info, warnings, error);
        result.add_standard_warnings();
        result
    }
}

/// Model-backed food analysis.
///
/// Holds an injected client; parsing failures surface as error-flagged
/// results, only an upstream model failure propagates as an error.
pub struct FoodAnalysisService {
    client: Arc<dyn LlmClient>,
    parser: FoodResponseParser,
}

impl FoodAnalysisService {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            parser: FoodResponseParser::new(),
        }
    }

    /// Analyze a food description.
    pub async fn analyze(&self, description: &str) -> Result<FoodAnalysisResult> {
        tracing::info!(preview = %preview(description), "analyzing food description");
        let prompt = self.analysis_prompt(description);
        let response = self.client.invoke(&prompt).await?;
        Ok(self.parser.parse(&response, description))
    }

    /// Analyze a food photograph.
    pub async fn analyze_image(&self, image: &[u8]) -> Result<FoodAnalysisResult> {
        let prompt = self.analysis_prompt("the food in this image");
        let response = self.client.invoke_with_image(&prompt, image).await?;
        Ok(self.parser.parse(&response, "Unknown food"))
    }

    /// Re-run an analysis with user feedback. The corrected result keeps
    /// the previous result's id.
    pub async fn correct(
        &self,
        previous: &FoodAnalysisResult,
        user_comment: &str,
    ) -> Result<FoodAnalysisResult> {
        let prompt = self.correction_prompt(previous, user_comment)?;
        let response = self.client.invoke(&prompt).await?;
        let mut corrected = self.parser.parse(&response, &previous.food_name);
        corrected.id = previous.id;
        Ok(corrected)
    }

    fn analysis_prompt(&self, description: &str) -> String {
        format!(
            "Analyze {description} and respond with a JSON object holding \
             \"food_name\", \"ingredients\" (name, servings in grams), \
             \"nutrition_info\" (calories, protein, carbs, fat, sodium, fiber, sugar) \
             and \"warnings\".\n\nFood description: {description}"
        )
    }

    fn correction_prompt(
        &self,
        previous: &FoodAnalysisResult,
        user_comment: &str,
    ) -> Result<String> {
        let previous_json = serde_json::to_string_pretty(previous)?;
        Ok(format!(
            "Here is a previous food analysis:\n{previous_json}\n\n\
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
        let parser = FoodResponseParser::new();
        let response = r#"{
            "food_name": "Apple",
            "ingredients": [{"name": "Apple", "servings": 100}],
            "nutrition_info": {"calories": 95, "protein": 0.5, "carbs": 25, "fat": 0.3,
                               "sodium": 2, "fiber": 4.4, "sugar": 19},
            "warnings": []
        }"#;
        let result = parser.parse(response, "fallback");
        assert_eq!(result.food_name, "Apple");
        assert_eq!(result.ingredients.len(), 1);
        assert_eq!(result.nutrition_info.calories, 95.0);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_fenced_response_with_trailing_comma() {
        let parser = FoodResponseParser::new();
        let response = "Sure! Here's the analysis:\n```json\n{\"food_name\": \"Apple\", \"nutrition_info\": {\"calories\": 95, \"protein\": 0.5,}}\n```\nHope that helps!";
        let result = parser.parse(response, "fallback");
        assert_eq!(result.food_name, "Apple");
        assert_eq!(result.nutrition_info.calories, 95.0);
        assert_eq!(result.nutrition_info.protein, 0.5);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_defaults_missing_keys() {
        let parser = FoodResponseParser::new();
        let result = parser.parse(r#"{"food_name": "Toast"}"#, "fallback");
        assert_eq!(result.food_name, "Toast");
        assert!(result.ingredients.is_empty());
        assert_eq!(result.nutrition_info, NutritionInfo::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_tolerates_string_numbers() {
        let parser = FoodResponseParser::new();
        let response = r#"{"food_name": "Rice", "nutrition_info": {"calories": "206"}}"#;
        let result = parser.parse(response, "fallback");
        assert_eq!(result.nutrition_info.calories, 206.0);
    }

    #[test]
    fn test_parse_no_json_uses_fallback_name_and_preview() {
        let parser = FoodResponseParser::new();
        let long_prose = "no structured content here ".repeat(20);
        let result = parser.parse(&long_prose, "Nasi goreng");
        assert_eq!(result.food_name, "Nasi goreng");
        let error = result.error.unwrap();
        assert!(error.starts_with("Failed to parse response: no structured content"));
        // "Failed to parse response: " + 100-char preview + "..."
        assert!(error.len() <= "Failed to parse response: ".len() + 100 + 3);
    }

    #[test]
    fn test_parse_unrecoverable_json_sets_error() {
        let parser = FoodResponseParser::new();
        let result = parser.parse(r#"{"a": nope}"#, "fallback");
        assert_eq!(result.food_name, "fallback");
        assert!(result.error.unwrap().starts_with("Failed to parse response:"));
    }

    #[test]
    fn test_parse_appends_standard_warnings() {
        let parser = FoodResponseParser::new();
        let response = r#"{"food_name": "Ramen", "nutrition_info": {"sodium": 1800}}"#;
        let result = parser.parse(response, "fallback");
        assert!(result
            .warnings
            .iter()
            .any(|w| w == crate::analysis::entities::HIGH_SODIUM_WARNING));
    }

    #[test]
    fn test_parse_passes_through_model_error_field() {
        let parser = FoodResponseParser::new();
        let response = r#"{"error": "Cannot identify the food", "food_name": "unknown"}"#;
        let result = parser.parse(response, "fallback");
        assert_eq!(result.error.as_deref(), Some("Cannot identify the food"));
    }
}
