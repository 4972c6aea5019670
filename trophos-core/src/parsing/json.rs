//! JSON parser with fuzzy repair

use super::extract::extract_json_from_text;
use super::parser::{OutputParser, ParseError, ParseResult, ParserConfig};
use super::repair::fix_common_json_errors;

/// Parse a candidate JSON string, repairing it once if the first decode
/// fails.
///
/// Exactly two decode attempts are made: the candidate as-is, then the
/// repaired candidate. Valid input never touches the repair pass, so sound
/// escaped content is never rewritten. The error for an unrecoverable
/// candidate carries the decode message and a bounded preview of the
/// original (unrepaired) text.
pub fn parse_json_safely(candidate: &str) -> ParseResult<serde_json::Value> {
    if candidate.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::warn!(error = %first, "standard JSON decode failed, attempting repair");
            let repaired = fix_common_json_errors(candidate);
            serde_json::from_str(&repaired).map_err(|second| {
                tracing::error!(error = %second, "JSON decode failed after repair");
                ParseError::malformed(second.to_string(), candidate)
            })
        }
    }
}

/// JSON parser with repair capabilities
pub struct JsonParser {
    config: ParserConfig,
}

impl JsonParser {
    /// Create a new JSON parser with default config
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Create a strict parser (no repair)
    pub fn strict() -> Self {
        Self {
            config: ParserConfig::strict(),
        }
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputParser for JsonParser {
    type Output = serde_json::Value;

    fn parse(&self, raw: &str) -> ParseResult<Self::Output> {
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let input = if self.config.trim_whitespace {
            raw.trim()
        } else {
            raw
        };

        let candidate = if self.config.extract_candidate {
            match extract_json_from_text(input) {
                Some(candidate) => candidate,
                None => return Err(ParseError::NoJsonFound),
            }
        } else {
            input.to_string()
        };

        if candidate.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        if !self.config.attempt_repair {
            return serde_json::from_str(&candidate)
                .map_err(|e| ParseError::malformed(e.to_string(), &candidate));
        }

        parse_json_safely(&candidate)
    }

    fn can_parse(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.starts_with('{')
            || trimmed.starts_with('[')
            || trimmed.contains("```")
            || trimmed.contains('{')
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
