//! Investment-thesis scoring.
//!
//! Pure and deterministic: (company profile, extraction) in, explainable
//! 0-100 fit score out. No I/O, no shared state; safe to call
//! concurrently and repeatedly.
//!
//! Four criteria: market alignment, stage alignment, geography, and
//! traction signals. Each scores 0-100, then a weighted sum produces
//! the total. Signal availability drives a confidence label, and low
//! confidence shifts a little weight away from traction.

use serde::{Deserialize, Serialize};

use crate::types::company::CompanyProfile;
use crate::types::enrichment::ExtractionRecord;

/// Keyword families scanned in signal lists. Shared with the insight
/// generator so both read the same evidence.
pub(crate) const HIRING_FAMILY: [&str; 2] = ["hiring", "careers"];
pub(crate) const CONTENT_FAMILY: [&str; 2] = ["blog", "content"];
pub(crate) const PRODUCT_FAMILY: [&str; 2] = ["product", "changelog"];

/// Case-insensitive substring scan for one keyword family.
pub(crate) fn signals_mention(signals: &[String], needles: &[&str]) -> bool {
    signals.iter().any(|signal| {
        let lower = signal.to_lowercase();
        needles.iter().any(|needle| lower.contains(needle))
    })
}

/// Relative weights of the four criteria. Sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisWeights {
    pub market_alignment: f64,
    pub stage_alignment: f64,
    pub geography: f64,
    pub traction_signals: f64,
}

impl Default for ThesisWeights {
    fn default() -> Self {
        Self {
            market_alignment: 0.30,
            stage_alignment: 0.20,
            geography: 0.20,
            traction_signals: 0.30,
        }
    }
}

/// The house thesis: what the fund looks for and how much each
/// criterion counts. Loaded once, never mutated; per-call weight
/// adjustments are computed on a local copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thesis {
    pub name: String,
    pub focus: Vec<String>,
    pub weights: ThesisWeights,
}

impl Default for Thesis {
    fn default() -> Self {
        Self {
            name: "Early Stage India Fund".to_string(),
            focus: vec![
                "India-first startups".to_string(),
                "ClimateTech & DeepTech".to_string(),
                "Pre-Seed / Seed stage".to_string(),
                "Technical founders".to_string(),
            ],
            weights: ThesisWeights::default(),
        }
    }
}

/// Reliability of a score, driven by how many signals were available,
/// not by score magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Classify by signal count: >= 4 High, 2-3 Medium, 0-1 Low.
    pub fn from_signal_count(count: usize) -> Self {
        if count >= 4 {
            Self::High
        } else if count >= 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Per-criterion contributions to the total, each rounded
/// independently. Cells sum to the total up to rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub market_alignment: i64,
    pub stage_alignment: i64,
    pub geography: i64,
    pub traction_signals: i64,
}

/// Outcome of one scoring call. Derived fresh every time; never cached
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: i64,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub confidence: Confidence,
}

impl ScoringResult {
    /// The not-yet-enriched result: zero everywhere, low confidence,
    /// nothing to explain.
    pub fn unscored() -> Self {
        Self {
            score: 0,
            breakdown: ScoreBreakdown::default(),
            reasons: Vec::new(),
            confidence: Confidence::Low,
        }
    }
}

/// Score a company against the thesis.
///
/// `extraction == None` means no enrichment has happened yet and yields
/// [`ScoringResult::unscored`]. Otherwise every criterion contributes,
/// strong and partial alignments add a reason string, and the signal
/// list drives traction and confidence.
pub fn score_company(
    profile: &CompanyProfile,
    extraction: Option<&ExtractionRecord>,
    thesis: &Thesis,
) -> ScoringResult {
    let Some(extraction) = extraction else {
        return ScoringResult::unscored();
    };

    let mut reasons: Vec<String> = Vec::new();

    let (market_score, market_reason) = market_alignment(&profile.sector);
    if let Some(reason) = market_reason {
        reasons.push(reason.to_string());
    }

    let (stage_score, stage_reason) = stage_alignment(&profile.stage);
    if let Some(reason) = stage_reason {
        reasons.push(reason.to_string());
    }

    let (geography_score, geography_reason) = geography_alignment(&profile.location);
    if let Some(reason) = geography_reason {
        reasons.push(reason.to_string());
    }

    // Traction families are additive and each counts once, so the raw
    // traction score tops out at 100
    let signals = &extraction.signals;
    let signal_count = signals.len();
    let mut traction_score = 0.0;
    if signals_mention(signals, &HIRING_FAMILY) {
        traction_score += 40.0;
        reasons.push("Actively hiring".to_string());
    }
    if signals_mention(signals, &CONTENT_FAMILY) {
        traction_score += 30.0;
        reasons.push("Active content".to_string());
    }
    if signals_mention(signals, &PRODUCT_FAMILY) {
        traction_score += 30.0;
        reasons.push("Product updates".to_string());
    }

    let confidence = Confidence::from_signal_count(signal_count);
    let weights = effective_weights(thesis.weights, confidence, signal_count);

    let breakdown = ScoreBreakdown {
        market_alignment: round(market_score * weights.market_alignment),
        stage_alignment: round(stage_score * weights.stage_alignment),
        geography: round(geography_score * weights.geography),
        traction_signals: round(traction_score * weights.traction_signals),
    };

    let score = round(
        market_score * weights.market_alignment
            + stage_score * weights.stage_alignment
            + geography_score * weights.geography
            + traction_score * weights.traction_signals,
    );

    ScoringResult {
        score,
        breakdown,
        reasons,
        confidence,
    }
}

/// Weights actually used for one call.
///
/// Low confidence with at least one signal present shaves 10% off the
/// traction weight and splits the difference evenly across the other
/// three criteria. Everything else uses the base weights unchanged.
fn effective_weights(
    base: ThesisWeights,
    confidence: Confidence,
    signal_count: usize,
) -> ThesisWeights {
    if confidence != Confidence::Low || signal_count == 0 {
        return base;
    }

    let adjusted_traction = base.traction_signals * 0.9;
    let redistribution = (base.traction_signals - adjusted_traction) / 3.0;

    ThesisWeights {
        market_alignment: base.market_alignment + redistribution,
        stage_alignment: base.stage_alignment + redistribution,
        geography: base.geography + redistribution,
        traction_signals: adjusted_traction,
    }
}

fn market_alignment(sector: &str) -> (f64, Option<&'static str>) {
    match sector {
        "ClimateTech" => (100.0, Some("ClimateTech focus")),
        "DeepTech" => (90.0, Some("DeepTech sector")),
        "FinTech" | "HealthTech" => (60.0, Some("Adjacent sector")),
        _ => (30.0, None),
    }
}

fn stage_alignment(stage: &str) -> (f64, Option<&'static str>) {
    match stage {
        "Pre-Seed" => (100.0, Some("Pre-Seed stage")),
        "Seed" => (100.0, Some("Seed stage")),
        "Series A" => (40.0, Some("Series A")),
        _ => (20.0, None),
    }
}

fn geography_alignment(location: &str) -> (f64, Option<&'static str>) {
    match location {
        "India" => (100.0, Some("India-based")),
        "Southeast Asia" => (60.0, Some("Southeast Asia")),
        _ => (30.0, None),
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}
