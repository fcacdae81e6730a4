//! Parsing and repair of provider output.
//!
//! Model text is free-form even when the prompt demands strict JSON:
//! fenced blocks, prose around the object, trailing commentary. Parsing
//! happens in two stages with different failure behavior:
//!
//! 1. [`extract_json_object`] locates the first balanced `{...}` span.
//!    Finding no object is the one unrecoverable parse failure.
//! 2. [`validate_extraction`] repairs the parsed object field by field.
//!    It never fails; malformed fields become documented defaults.

use serde_json::Value;

use crate::error::{EnrichError, Result};
use crate::types::enrichment::ExtractionRecord;

/// Summary used when the model produced none.
pub const SUMMARY_FALLBACK: &str = "No summary available";

/// Single activity entry used when the model produced none.
pub const ACTIVITIES_FALLBACK: &str = "Information not available";

const MAX_ACTIVITIES: usize = 6;
const MAX_KEYWORDS: usize = 10;
const MAX_SIGNALS: usize = 5;

/// Locate the first balanced `{...}` span in free-form text.
///
/// Scans from the first `{` counting brace depth, ignoring braces
/// inside JSON string literals (quote and backslash aware). Returns
/// the span including both braces, or `None` when no balanced object
/// exists. Markdown fences need no special handling; the scan simply
/// walks past them.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in raw.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    // `}` is ASCII, so this is a char boundary
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse provider output into a repaired [`ExtractionRecord`].
///
/// Fails only when no balanced JSON object exists or the located span
/// is not valid JSON; everything past that point is repair, not
/// rejection.
pub fn parse_extraction(raw: &str) -> Result<ExtractionRecord> {
    let object = extract_json_object(raw).ok_or_else(|| EnrichError::ExtractionParse {
        reason: "no balanced JSON object in provider output".to_string(),
    })?;

    let value: Value = serde_json::from_str(object).map_err(|e| EnrichError::ExtractionParse {
        reason: format!("located object is not valid JSON: {e}"),
    })?;

    Ok(validate_extraction(&value))
}

/// Repair a parsed object into a well-formed record.
///
/// Total over arbitrary JSON, including `{}`:
/// - blank or non-string `summary` becomes [`SUMMARY_FALLBACK`],
/// - `whatTheyDo` keeps its string elements and falls back to a single
///   [`ACTIVITIES_FALLBACK`] entry when nothing survives,
/// - `keywords` and `signals` keep their string elements, defaulting to
///   empty,
/// - elements are trimmed, blanks dropped, lists clamped to the schema
///   bounds (6 activities, 10 keywords, 5 signals).
pub fn validate_extraction(raw: &Value) -> ExtractionRecord {
    let summary = raw
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(SUMMARY_FALLBACK)
        .to_string();

    let mut what_they_do = string_items(raw.get("whatTheyDo"), MAX_ACTIVITIES);
    if what_they_do.is_empty() {
        what_they_do.push(ACTIVITIES_FALLBACK.to_string());
    }

    let keywords = string_items(raw.get("keywords"), MAX_KEYWORDS);
    let signals = string_items(raw.get("signals"), MAX_SIGNALS);

    ExtractionRecord {
        summary,
        what_they_do,
        keywords,
        signals,
    }
}

/// String elements of a JSON array: trimmed, blanks and non-strings
/// dropped, clamped to `limit`. Anything that isn't an array yields an
/// empty list.
fn string_items(value: Option<&Value>, limit: usize) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(limit)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
