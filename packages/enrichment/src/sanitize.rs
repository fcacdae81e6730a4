//! Input sanitization for user-provided text.
//!
//! Everything user-controlled passes through here before it reaches a
//! fetch or a prompt. Sanitizers are total: they never fail, they only
//! strip and truncate. Rejecting an empty or non-http(s) URL is the
//! caller's job, after sanitization.

use regex::Regex;

/// Hard cap on sanitized input length, in characters.
pub const MAX_INPUT_CHARS: usize = 10_000;

/// Phrases that attempt to override the extraction instructions.
///
/// Matched case-insensitively with flexible internal whitespace and
/// replaced with `[filtered]` before the text enters a prompt.
const INJECTION_PATTERNS: [&str; 5] = [
    r"(?i)ignore\s+previous\s+instructions",
    r"(?i)disregard\s+all\s+prior",
    r"(?i)forget\s+everything",
    r"(?i)new\s+instructions:",
    r"(?i)system\s+prompt:",
];

/// Strip ASCII control characters, cap length, and trim.
///
/// Removes U+0000..=U+001F and U+007F (including newlines and tabs),
/// truncates to [`MAX_INPUT_CHARS`], then trims surrounding whitespace.
pub fn sanitize_user_input(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{00}'..='\u{1f}' | '\u{7f}'))
        .take(MAX_INPUT_CHARS)
        .collect();

    cleaned.trim().to_string()
}

/// Sanitize text destined for an LLM prompt.
///
/// Applies [`sanitize_user_input`], then neutralizes known
/// instruction-override phrases.
pub fn sanitize_prompt_input(raw: &str) -> String {
    let mut text = sanitize_user_input(raw);

    for pattern in INJECTION_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        text = re.replace_all(&text, "[filtered]").to_string();
    }

    text
}
