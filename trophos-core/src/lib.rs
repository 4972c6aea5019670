//! # Trophos - Tolerant Analysis Pipeline for Generative Nutrition Models
//!
//! Trophos (Τροφός) turns the free-form text a generative model returns for
//! food and exercise questions into typed analysis results, without ever
//! letting a malformed response escalate into a failure the caller has to
//! handle:
//! - Candidate extraction from fenced, prefixed, or prose-wrapped output
//! - Single-pass repair of the JSON defects models actually produce
//!   (quoting, commas, colons, unbalanced brackets)
//! - Typed parse errors with bounded diagnostics
//! - Domain parsers that default every missing field and flag failures in
//!   an `error` field instead of erroring
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trophos_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(GeminiClient::from_env()?);
//!     let service = FoodAnalysisService::new(client);
//!
//!     let result = service.analyze("two scrambled eggs on toast").await?;
//!     println!("{}: {} kcal", result.food_name, result.nutrition_info.calories);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The parsing pipeline is pure, synchronous text processing with no shared
//! state; concurrent requests each run it on their own response text. The
//! model client is the only async seam and is injected once at startup:
//! - **Extraction**: locate the plausible JSON substring
//! - **Repair**: best-effort rewrites, idempotent and infallible
//! - **Parsing**: at most two decode attempts, then a typed error
//! - **Services**: map recovered values into domain results

pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod parsing;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{
        ExerciseAnalysisResult, ExerciseAnalysisService, ExerciseResponseParser,
        FoodAnalysisResult, FoodAnalysisService, FoodResponseParser, Ingredient, NutritionInfo,
    };
    pub use crate::config::GeminiConfig;
    pub use crate::error::{Result, TrophosError};
    pub use crate::llm::{GeminiClient, LlmClient, ModelInfo, StubLlmClient};
    pub use crate::parsing::{
        extract_json_from_text, fix_common_json_errors, parse_json_safely, JsonParser,
        OutputParser, ParseError, ParseResult, ParserConfig,
    };
}
