//! Deterministic demo enrichment.
//!
//! The network-free fallback path: a fixed-shape record derived only
//! from the URL's domain. Returned whenever live extraction is
//! unconfigured or fails, so callers always receive a structurally
//! valid result.

use crate::types::enrichment::{EnrichmentEnvelope, ExtractionRecord};

/// Domain part of a URL: scheme and leading `www.` stripped, everything
/// from the first `/` dropped.
pub fn demo_domain(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let stripped = stripped.strip_prefix("www.").unwrap_or(stripped);

    stripped.split('/').next().unwrap_or_default().to_string()
}

/// Build the demo record for a URL.
///
/// Same URL, same record; only the domain in the summary varies.
pub fn demo_enrichment(url: &str) -> ExtractionRecord {
    let domain = demo_domain(url);

    ExtractionRecord {
        summary: format!(
            "{domain} is a technology platform focused on innovation and growth. \
             The company provides solutions for modern digital challenges."
        ),
        what_they_do: vec![
            "Develops cutting-edge technology solutions".to_string(),
            "Serves a global customer base".to_string(),
            "Focuses on scalability and performance".to_string(),
            "Provides developer-friendly tools and APIs".to_string(),
        ],
        keywords: vec![
            "Technology".to_string(),
            "Innovation".to_string(),
            "Platform".to_string(),
            "Digital".to_string(),
            "Solutions".to_string(),
            "Growth".to_string(),
            "Development".to_string(),
            "API".to_string(),
        ],
        signals: vec![
            "Active website".to_string(),
            "Professional design".to_string(),
            "Content available".to_string(),
            "Established presence".to_string(),
        ],
    }
}

/// Build the demo envelope for a URL, flagged `demo: true`.
pub fn demo_envelope(url: &str) -> EnrichmentEnvelope {
    EnrichmentEnvelope::demo(demo_enrichment(url), url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_derivation() {
        assert_eq!(demo_domain("https://www.acme.io/about"), "acme.io");
        assert_eq!(demo_domain("http://acme.io"), "acme.io");
        assert_eq!(demo_domain("https://sub.acme.io/a/b?c=d"), "sub.acme.io");
        assert_eq!(demo_domain("acme.io/path"), "acme.io");
    }

    #[test]
    fn test_record_is_deterministic() {
        let a = demo_enrichment("https://acme.io");
        let b = demo_enrichment("https://acme.io");
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_carries_domain() {
        let record = demo_enrichment("https://www.acme.io/pricing");
        assert!(record.summary.starts_with("acme.io is a technology platform"));
    }

    #[test]
    fn test_record_shape() {
        let record = demo_enrichment("https://acme.io");
        assert_eq!(record.what_they_do.len(), 4);
        assert_eq!(record.keywords.len(), 8);
        assert_eq!(record.signals.len(), 4);
    }

    #[test]
    fn test_envelope_flags_demo() {
        let envelope = demo_envelope("https://acme.io");
        assert!(envelope.demo);
        assert_eq!(envelope.source, "https://acme.io");
    }
}
