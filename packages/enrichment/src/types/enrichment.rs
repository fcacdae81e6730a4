//! Enrichment record and envelope types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The structured record extracted from a company website.
///
/// This is the fixed schema the LLM is asked to fill. Every field has a
/// serde default so a partial provider response still deserializes;
/// `parse::validate_extraction` repairs whatever is missing afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    /// Two-sentence company description
    #[serde(default)]
    pub summary: String,

    /// What the company does, 3-6 bullet points
    #[serde(default)]
    pub what_they_do: Vec<String>,

    /// 5-10 relevant keywords
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Observed traction signals, 2-5 entries
    /// (e.g. "Careers page exists", "Blog exists", "Actively hiring")
    #[serde(default)]
    pub signals: Vec<String>,
}

/// A completed enrichment with provenance.
///
/// `source` is the sanitized URL the record was derived from. The
/// envelope is handed to the caller for persistence; the pipeline keeps
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentEnvelope {
    /// The extracted record
    pub data: ExtractionRecord,

    /// Sanitized URL the record describes
    pub source: String,

    /// When the enrichment completed
    pub timestamp: DateTime<Utc>,

    /// True when `data` is deterministic demo content rather than a
    /// live extraction. Omitted from the wire when false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub demo: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl EnrichmentEnvelope {
    /// Wrap a live extraction.
    pub fn live(data: ExtractionRecord, source: impl Into<String>) -> Self {
        Self {
            data,
            source: source.into(),
            timestamp: Utc::now(),
            demo: false,
        }
    }

    /// Wrap demo content.
    pub fn demo(data: ExtractionRecord, source: impl Into<String>) -> Self {
        Self {
            data,
            source: source.into(),
            timestamp: Utc::now(),
            demo: true,
        }
    }
}
