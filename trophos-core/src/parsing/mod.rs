//! Structured Output Parsing
//!
//! Robust recovery of structured data from free-form model output. Nothing
//! about the text a generative model returns can be trusted: JSON arrives
//! wrapped in markdown fences, prefixed with prose, quoted with the wrong
//! quotes, or cut off mid-bracket. This module recovers a decodable value
//! from all of those shapes, in three composable stages:
//!
//! - **Extraction** ([`extract_json_from_text`]): locate the substring that
//!   is plausibly JSON, independent of whether it decodes.
//! - **Repair** ([`fix_common_json_errors`]): best-effort rewrites of
//!   near-JSON text (quoting, commas, colons, bracket balance).
//! - **Parsing** ([`parse_json_safely`], [`JsonParser`]): decode, repair
//!   once on failure, and convert anything unrecoverable into a typed
//!   [`ParseError`].
//!
//! # Example
//!
//! ```rust
//! use trophos_core::parsing::{JsonParser, OutputParser};
//!
//! let parser = JsonParser::new();
//! let result = parser.parse("```json\n{\"key\": \"value\",}\n```").unwrap();
//! assert_eq!(result["key"], "value");
//! ```

mod extract;
mod json;
mod parser;
mod repair;

pub use extract::extract_json_from_text;
pub use json::{parse_json_safely, JsonParser};
pub use parser::{preview, OutputParser, ParseError, ParseResult, ParserConfig, PREVIEW_CHARS};
pub use repair::fix_common_json_errors;
