use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use enrichment::insight::generate_insight;
use enrichment::scoring::{score_company, ScoringResult};
use enrichment::{CompanyProfile, ExtractionRecord};

use crate::server::app::AppState;

/// Request body for scoring.
#[derive(Deserialize)]
pub struct ScoreRequest {
    pub profile: CompanyProfile,
    #[serde(default)]
    pub extraction: Option<ExtractionRecord>,
}

/// Scoring response: the numeric result plus a one-line narrative.
#[derive(Serialize)]
pub struct ScoreResponse {
    pub result: ScoringResult,
    pub insight: String,
}

/// Score a company against the house thesis
///
/// Pure computation, never fails. A request without extraction data
/// yields the unscored result.
pub async fn score_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreResponse> {
    let result = score_company(&request.profile, request.extraction.as_ref(), &state.thesis);

    let insight = match &request.extraction {
        Some(extraction) => generate_insight(&extraction.signals),
        None => generate_insight(&[]),
    };

    Json(ScoreResponse { result, insight })
}
