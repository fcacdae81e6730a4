//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use enrichment::fetch::PageFetcher;
use enrichment::pipeline::Enricher;
use enrichment::providers::{CompletionProvider, Gemini, OpenAI};
use enrichment::scoring::Thesis;
use enrichment::security::ProviderCredentials;

use crate::config::Config;
use crate::server::routes::{enrich_handler, health_handler, score_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub enricher: Arc<Enricher<OpenAI, Gemini>>,
    pub thesis: Arc<Thesis>,
    pub openai_configured: bool,
    pub gemini_configured: bool,
}

/// Build the Axum application router
///
/// Providers are constructed from the config; a missing or placeholder
/// OpenAI key leaves the pipeline in demo mode, which is a fully
/// supported serving state.
pub fn build_app(config: &Config) -> Router {
    let mut openai = OpenAI::new(credentials(config.openai_api_key.as_deref()));
    if let Some(model) = &config.openai_model {
        openai = openai.with_model(model.as_str());
    }

    let mut gemini = Gemini::new(credentials(config.gemini_api_key.as_deref()));
    if let Some(model) = &config.gemini_model {
        gemini = gemini.with_model(model.as_str());
    }

    let openai_configured = openai.is_configured();
    let gemini_configured = gemini.is_configured();

    if openai_configured {
        tracing::info!("OpenAI provider configured");
    } else {
        tracing::warn!("OpenAI API key not configured, demo mode active");
    }
    if gemini_configured {
        tracing::info!("Gemini fallback provider configured");
    }

    let state = AppState {
        enricher: Arc::new(Enricher::new(openai, Some(gemini), PageFetcher::new())),
        thesis: Arc::new(Thesis::default()),
        openai_configured,
        gemini_configured,
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/enrich", post(enrich_handler))
        .route("/api/score", post(score_handler))
        .route("/api/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn credentials(key: Option<&str>) -> ProviderCredentials {
    match key {
        Some(key) => ProviderCredentials::new(key),
        None => ProviderCredentials::unconfigured(),
    }
}
