//! Domain models for food and exercise analysis results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single ingredient identified in a food description or image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Serving amount in grams
    #[serde(default)]
    pub servings: f64,
}

/// Nutrition information for an analyzed food
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    /// Calories in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
    /// Sodium in milligrams
    #[serde(default)]
    pub sodium: f64,
    /// Fiber in grams
    #[serde(default)]
    pub fiber: f64,
    /// Sugar in grams
    #[serde(default)]
    pub sugar: f64,
}

/// Sodium level above which a standard warning is attached, in milligrams.
pub const HIGH_SODIUM_THRESHOLD: f64 = 500.0;
/// Sugar level above which a standard warning is attached, in grams.
pub const HIGH_SUGAR_THRESHOLD: f64 = 20.0;

pub const HIGH_SODIUM_WARNING: &str = "High sodium content";
pub const HIGH_SUGAR_WARNING: &str = "High sugar content";

/// Food analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodAnalysisResult {
    /// Unique identifier
    pub id: Uuid,
    /// Name of the food
    pub food_name: String,
    /// List of ingredients
    pub ingredients: Vec<Ingredient>,
    /// Nutrition information
    pub nutrition_info: NutritionInfo,
    /// Nutritional warnings
    pub warnings: Vec<String>,
    /// Error message if analysis failed
    pub error: Option<String>,
    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl FoodAnalysisResult {
    pub fn new(
        food_name: impl Into<String>,
        ingredients: Vec<Ingredient>,
        nutrition_info: NutritionInfo,
        warnings: Vec<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            food_name: food_name.into(),
            ingredients,
            nutrition_info,
            warnings,
            error,
            timestamp: Utc::now(),
        }
    }

    /// An empty result flagged with an error message; every domain field
    /// holds its default.
    pub fn failure(default_food_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(
            default_food_name,
            Vec::new(),
            NutritionInfo::default(),
            Vec::new(),
            Some(error.into()),
        )
    }

    /// Attach the standard threshold warnings for the current nutrition
    /// values. Existing warnings are kept; duplicates are not added.
    pub fn add_standard_warnings(&mut self) {
        if self.nutrition_info.sodium > HIGH_SODIUM_THRESHOLD
            && !self.warnings.iter().any(|w| w == HIGH_SODIUM_WARNING)
        {
            self.warnings.push(HIGH_SODIUM_WARNING.to_string());
        }
        if self.nutrition_info.sugar > HIGH_SUGAR_THRESHOLD
            && !self.warnings.iter().any(|w| w == HIGH_SUGAR_WARNING)
        {
            self.warnings.push(HIGH_SUGAR_WARNING.to_string());
        }
    }
}

/// Exercise analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAnalysisResult {
    /// Unique identifier
    pub id: Uuid,
    /// Type of exercise (e.g. running, swimming)
    pub exercise_type: String,
    /// Estimated calories burned
    pub calories_burned: f64,
    /// Duration as reported by the model (e.g. "30 minutes")
    pub duration: String,
    /// Exercise intensity (low, medium, high, unknown)
    pub intensity: String,
    /// Metabolic equivalent of the exercise
    pub met_value: f64,
    /// Error message if analysis failed
    pub error: Option<String>,
    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl ExerciseAnalysisResult {
    pub fn new(
        exercise_type: impl Into<String>,
        calories_burned: f64,
        duration: impl Into<String>,
        intensity: impl Into<String>,
        met_value: f64,
        error: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_type: exercise_type.into(),
            calories_burned,
            duration: duration.into(),
            intensity: intensity.into(),
            met_value,
            error,
            timestamp: Utc::now(),
        }
    }

    /// An "unknown" result flagged with an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::new("unknown", 0.0, "unknown", "unknown", 0.0, Some(error.into()))
    }
}
