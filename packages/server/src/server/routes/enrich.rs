use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use enrichment::EnrichError;

use crate::server::app::AppState;

/// Request body for enrichment.
#[derive(Deserialize)]
pub struct EnrichRequest {
    pub url: String,
}

/// Error payload for failed calls.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

/// Enrich a company website
///
/// Returns 200 with an enrichment envelope whenever the URL is usable;
/// recoverable failures are served as demo data inside the envelope.
/// 400 is reserved for invalid input.
pub async fn enrich_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<EnrichRequest>,
) -> impl IntoResponse {
    match state.enricher.enrich(&request.url).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(err @ EnrichError::InvalidInput { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
                fallback: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: err.to_string(),
                fallback: Some(true),
            }),
        )
            .into_response(),
    }
}
