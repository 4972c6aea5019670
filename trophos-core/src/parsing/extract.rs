//! Candidate location: find the JSON-looking substring of a model response

use regex::Regex;
use std::sync::LazyLock;

/// Extract the best-guess JSON substring from arbitrary model output.
///
/// Resolution order:
/// 1. The first markdown code fence, with or without a `json` language tag.
///    Later fences are ignored on purpose; models sometimes echo an earlier
///    answer in a second block.
/// 2. The widest `{`…`}` span in the raw text. Objects win over arrays;
///    a `[`…`]` span is only considered when no object span exists.
/// 3. `None` when the text contains nothing bracket-like at all.
///
/// The returned candidate has known non-JSON artifacts stripped (BOM, XML
/// declaration, stray `json` hint token) but is not guaranteed to decode.
/// This function never fails.
pub fn extract_json_from_text(text: &str) -> Option<String> {
    static CODE_FENCE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"```(?i:json)?[ \t]*\r?\n?([\s\S]*?)```").unwrap());

    tracing::debug!(len = text.len(), "extracting JSON candidate");

    if let Some(caps) = CODE_FENCE_RE.captures(text) {
        if let Some(inner) = caps.get(1) {
            return Some(strip_artifacts(inner.as_str().trim()));
        }
    }

    if let Some(span) = widest_span(text, '{', '}').or_else(|| widest_span(text, '[', ']')) {
        return Some(strip_artifacts(span));
    }

    tracing::warn!("no JSON found in text response");
    None
}

/// Widest span between the first opener and the last closer. Deliberately
/// greedy: a naive first-close match would cut nested objects short.
fn widest_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Strip non-JSON artifacts that models and transports occasionally prepend:
/// a byte-order mark, an XML declaration, or a leftover `json` language hint
/// that survived fence stripping.
fn strip_artifacts(candidate: &str) -> String {
    let mut rest = candidate.strip_prefix('\u{feff}').unwrap_or(candidate);
    rest = rest.trim_start();

    if rest.starts_with("<?xml") {
        if let Some(end) = rest.find("?>") {
            rest = rest[end + 2..].trim_start();
        }
    }

    for newline in ["json\n", "json\r\n"] {
        if let Some(stripped) = rest.strip_prefix(newline) {
            rest = stripped.trim_start();
            break;
        }
    }

    rest.trim().to_string()
}
