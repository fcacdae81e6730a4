//! LLM prompts for the extraction step.
//!
//! One fixed instruction pair, shared verbatim across providers so the
//! fallback provider answers an equivalent request.

use sha2::{Digest, Sha256};

/// System role for the extraction call.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are a startup intelligence analyst. \
Extract structured data and return ONLY valid JSON, no markdown, no extra text. \
Follow the exact schema provided.";

/// User prompt template. `{content}` is replaced with the reduced,
/// prompt-sanitized page text.
pub const EXTRACTION_USER_PROMPT: &str = r#"Extract from this startup website:

1. Summary (2 sentences)
2. What they do (3-6 bullet points)
3. Keywords (5-10 relevant keywords)
4. Signals (2-5 signals like "Careers page exists", "Blog exists", "Actively hiring")

Return ONLY this JSON structure:
{
  "summary": "...",
  "whatTheyDo": ["..."],
  "keywords": ["..."],
  "signals": ["..."]
}

Website content:
{content}"#;

/// Hash of both extraction prompts, for cache invalidation.
///
/// If the prompts change, previously stored enrichments were produced
/// by a different instruction and should be considered stale.
pub fn extraction_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(EXTRACTION_SYSTEM_PROMPT.as_bytes());
    hasher.update(EXTRACTION_USER_PROMPT.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Format the user prompt with page content.
pub fn format_extraction_prompt(content: &str) -> String {
    EXTRACTION_USER_PROMPT.replace("{content}", content)
}
