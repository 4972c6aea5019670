//! Domain consumers of the parsing pipeline
//!
//! Response parsers map a recovered [`serde_json::Value`] into typed
//! analysis results. The pipeline guarantees nothing about which keys are
//! present, so every field here is defaulted on absence and numeric fields
//! tolerate string-typed numbers. Parse failures become error-flagged
//! results rather than errors; the services only propagate upstream model
//! failures.

use serde_json::Value;

pub mod entities;
pub mod exercise;
pub mod food;

pub use entities::{ExerciseAnalysisResult, FoodAnalysisResult, Ingredient, NutritionInfo};
pub use exercise::{ExerciseAnalysisService, ExerciseResponseParser};
pub use food::{FoodAnalysisService, FoodResponseParser};

/// Numeric field with leniency for string-typed numbers; anything else is 0.
pub(crate) fn number_field(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// String field; numbers are rendered, anything else maps to the default.
pub(crate) fn string_field(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}
