//! Best-effort recovery of a JSON object from free-form model output.
//!
//! Models asked for "JSON only" still wrap answers in Markdown fences or add
//! a sentence before and after. [`extract_document`] peels those layers off
//! and never fails: when nothing parses it returns a document describing the
//! failure with a truncated copy of the text.

use serde_json::{Map, Value};

use crate::models::document::ExtractedDocument;

/// Error text of the fallback document.
pub const PARSE_FAILURE: &str = "Failed to parse JSON";

/// How many characters of unparseable output are echoed back.
pub const RAW_PREVIEW_CHARS: usize = 500;

const FENCE: &str = "```";

/// Recover a JSON object from `text`.
///
/// 1. Trim, and strip a surrounding code fence (optionally tagged `json`).
/// 2. Parse the remainder directly.
/// 3. Otherwise parse the greedy span from the first `{` to the last `}`.
/// 4. Otherwise return `{"error": "Failed to parse JSON", "raw": ...}`.
///
/// Only objects count as success; a bare array or scalar falls through.
pub fn extract_document(text: &str) -> ExtractedDocument {
    let body = strip_code_fence(text.trim());

    if let Some(fields) = parse_object(body) {
        return ExtractedDocument::new(fields);
    }

    if let Some(fields) = braced_span(body).and_then(parse_object) {
        return ExtractedDocument::new(fields);
    }

    ExtractedDocument::parse_failure(PARSE_FAILURE, preview(body))
}

/// Remove an opening ```` ``` ````/```` ```json ```` line and a closing fence.
/// Text that does not start with a fence is returned unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest)
        .trim_start();
    let rest = rest.trim_end();
    rest.strip_suffix(FENCE).unwrap_or(rest).trim()
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Some(fields),
        _ => None,
    }
}

/// The widest `{ ... }` span: first opening brace to last closing brace.
fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn preview(text: &str) -> String {
    text.chars().take(RAW_PREVIEW_CHARS).collect()
}
