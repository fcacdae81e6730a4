//! One-sentence narrative insight derived from extracted signals.
//!
//! Reads the same keyword families as scoring, so the narrative never
//! contradicts the numbers. First matching rule wins.

use crate::scoring::{signals_mention, CONTENT_FAMILY, HIRING_FAMILY, PRODUCT_FAMILY};

/// Summarize a signal list as a short qualitative read.
///
/// Deterministic: the same signals always produce the same sentence.
pub fn generate_insight(signals: &[String]) -> String {
    let hiring = signals_mention(signals, &HIRING_FAMILY);
    let content = signals_mention(signals, &CONTENT_FAMILY);
    let product = signals_mention(signals, &PRODUCT_FAMILY);

    let insight = if hiring && (content || product) {
        "Active hiring and product iteration suggest early growth momentum. \
         Team is scaling while building."
    } else if hiring {
        "Active hiring indicates the company is in growth mode and expanding their team."
    } else if content && product {
        "Regular content and product updates show consistent execution and market engagement."
    } else if content {
        "Active content creation suggests strong market positioning and thought leadership."
    } else if product {
        "Recent product updates indicate active development and customer feedback integration."
    } else {
        "Limited public signals detected. Consider direct outreach for deeper intelligence."
    };

    insight.to_string()
}
