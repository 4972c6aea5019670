//! Best-effort rewrites of near-JSON text
//!
//! Every pass is a plain text transformation with no semantic understanding
//! of the payload. The whole function is idempotent and never fails. Pass
//! order is load-bearing: quote normalization must run before the bracket
//! scan, or escaped braces inside string values are miscounted as
//! structural brackets.

use regex::Regex;
use std::sync::LazyLock;

static SINGLE_QUOTED_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^'\\]*)'\s*:").unwrap());
static SINGLE_QUOTED_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*'([^'\\]*)'").unwrap());
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());
static ADJACENT_OBJECTS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\}\s*\{").unwrap());
static QUOTE_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""\s*\{"#).unwrap());
static ADJACENT_STRINGS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""\s*""#).unwrap());
static COLON_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":{2,}").unwrap());
static QUOTE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""{2,}"#).unwrap());
static ESCAPED_SOLE_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\{\s*"([^"\\]+)"\s*:\s*"\\"([^\\]*)\\""\s*\}\s*$"#).unwrap()
});

/// Sentinel for masked escaped quotes; never occurs in model output.
const QUOTE_MASK: char = '\u{0}';

/// Fix common JSON formatting errors in LLM outputs.
///
/// Passes run in order: quote normalization, comma/colon normalization,
/// bracket balancing, escaped-quote cleanup. Running the function twice
/// produces the same output as running it once.
pub fn fix_common_json_errors(candidate: &str) -> String {
    // Shortcut: an object whose sole value is wrapped entirely in escaped
    // quotes. The general passes would split the value at the inner quotes.
    if let Some(caps) = ESCAPED_SOLE_VALUE_RE.captures(candidate) {
        return format!(r#"{{"{}": "{}"}}"#, &caps[1], &caps[2]);
    }

    let fixed = normalize_quotes(candidate);
    let fixed = normalize_separators(&fixed);
    let fixed = balance_brackets(&fixed);
    let fixed = clean_escaped_quotes(&fixed);

    if fixed != candidate {
        tracing::debug!(preview = %super::parser::preview(&fixed), "repaired JSON candidate");
    }
    fixed
}

/// Smart quotes to straight quotes, then single-quoted keys and string
/// values to double-quoted form. The regexes skip anything containing
/// escapes so already-sound content is left alone.
fn normalize_quotes(input: &str) -> String {
    let straightened: String = input
        .chars()
        .map(|c| match c {
            '\u{201c}' | '\u{201d}' | '\u{201e}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect();

    let keyed = SINGLE_QUOTED_KEY_RE.replace_all(&straightened, "\"$1\":");
    SINGLE_QUOTED_VALUE_RE
        .replace_all(&keyed, ": \"$1\"")
        .into_owned()
}

/// Drop trailing commas, insert the commas models most often forget, and
/// collapse doubled colons.
fn normalize_separators(input: &str) -> String {
    let fixed = TRAILING_COMMA_RE.replace_all(input, "$1");
    let fixed = ADJACENT_OBJECTS_RE.replace_all(&fixed, "}, {");
    let fixed = QUOTE_BRACE_RE.replace_all(&fixed, "\", {");
    let fixed = ADJACENT_STRINGS_RE.replace_all(&fixed, "\", \"");
    COLON_RUN_RE.replace_all(&fixed, ":").into_owned()
}

/// Close any brackets left open at the end of the text, in reverse order of
/// how they were opened. Unmatched closers already present are ignored;
/// this pass only ever appends characters.
fn balance_brackets(input: &str) -> String {
    let mut stack = Vec::new();
    for ch in input.chars() {
        match ch {
            '{' | '[' => stack.push(ch),
            '}' if stack.last() == Some(&'{') => {
                stack.pop();
            }
            ']' if stack.last() == Some(&'[') => {
                stack.pop();
            }
            _ => {}
        }
    }

    let mut balanced = String::with_capacity(input.len() + stack.len());
    balanced.push_str(input);
    for open in stack.into_iter().rev() {
        balanced.push(if open == '{' { '}' } else { ']' });
    }
    balanced
}

/// Drop escaped double quotes, merging them into the surrounding literal.
/// Masking first keeps the collapse step scoped to runs of plain quotes.
fn clean_escaped_quotes(input: &str) -> String {
    if !input.contains("\\\"") {
        return input.to_string();
    }
    let masked = input.replace("\\\"", &QUOTE_MASK.to_string());
    let collapsed = QUOTE_RUN_RE.replace_all(&masked, "\"");
    collapsed.replace(QUOTE_MASK, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_single_quotes() {
        assert_eq!(fix_common_json_errors("{'key': 'value'}"), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_fix_smart_quotes() {
        assert_eq!(
            fix_common_json_errors("{\u{201c}key\u{201d}: \u{201c}value\u{201d}}"),
            r#"{"key": "value"}"#
        );
        assert_eq!(
            fix_common_json_errors("{\u{2018}key\u{2019}: \u{2018}value\u{2019}}"),
            r#"{"key": "value"}"#
        );
    }

    #[test]
    fn test_fix_trailing_comma_object() {
        assert_eq!(fix_common_json_errors(r#"{"key": "value",}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_fix_trailing_comma_array() {
        assert_eq!(fix_common_json_errors("[1, 2, 3,]"), "[1, 2, 3]");
    }

    #[test]
    fn test_fix_missing_comma_between_values() {
        assert_eq!(
            fix_common_json_errors(r#"{"key1": "value1" "key2": "value2"}"#),
            r#"{"key1": "value1", "key2": "value2"}"#
        );
    }

    #[test]
    fn test_fix_adjacent_objects_pinned() {
        // Still not a single valid JSON document; the naive insertion is
        // the documented behavior for back-to-back top-level objects.
        assert_eq!(
            fix_common_json_errors(r#"{"a": 1}{"b": 2}"#),
            r#"{"a": 1}, {"b": 2}"#
        );
    }

    #[test]
    fn test_fix_extra_colons() {
        assert_eq!(fix_common_json_errors(r#"{"key":: "value"}"#), r#"{"key": "value"}"#);
        assert_eq!(fix_common_json_errors(r#"{"key"::: "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_balance_appends_missing_closers_in_reverse_order() {
        assert_eq!(
            fix_common_json_errors(r#"{"a": 1, "b": [1,2"#),
            r#"{"a": 1, "b": [1,2]}"#
        );
    }

    #[test]
    fn test_balance_single_missing_brace() {
        assert_eq!(fix_common_json_errors(r#"{"key": "value""#), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_balance_ignores_unmatched_closers() {
        // Only ever appends; stray closers stay put.
        assert_eq!(fix_common_json_errors("]}"), "]}");
    }

    #[test]
    fn test_escaped_sole_value_shortcut() {
        assert_eq!(
            fix_common_json_errors(r#"{"key": "\"value\""}"#),
            r#"{"key": "value"}"#
        );
    }

    #[test]
    fn test_escaped_quotes_inside_value_are_dropped() {
        assert_eq!(
            fix_common_json_errors(r#"{"a": "say \"hi\" now",}"#),
            r#"{"a": "say hi now"}"#
        );
    }

    #[test]
    fn test_idempotence_on_fixtures() {
        let fixtures = [
            "{'key': 'value'}",
            r#"{"key": "value",}"#,
            r#"{"a": 1}{"b": 2}"#,
            r#"{"key":: "value"}"#,
            r#"{"a": 1, "b": [1,2"#,
            r#"{"key": "\"value\""}"#,
            r#"{"key1": "value1" "key2": "value2"}"#,
            "\u{201c}a\u{201d}: 1",
            "",
            "not json at all",
            "]}",
        ];
        for fixture in fixtures {
            let once = fix_common_json_errors(fixture);
            let twice = fix_common_json_errors(&once);
            assert_eq!(once, twice, "repair not idempotent for {fixture:?}");
        }
    }

    #[test]
    fn test_never_panics_on_garbage() {
        for input in ["", "   ", "\u{0}\u{1}", "'''", "\\\"\\\"", "{{{{[[[["] {
            let _ = fix_common_json_errors(input);
        }
    }

    #[test]
    fn test_valid_json_passes_through() {
        let valid = r#"{"a": 1, "b": [2, 3], "c": {"d": "e"}}"#;
        assert_eq!(fix_common_json_errors(valid), valid);
    }
}
