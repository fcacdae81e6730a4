//! Website Enrichment and Thesis Scoring Library
//!
//! Turns a company website URL into structured intelligence: an LLM
//! extraction of what the company does, a deterministic fit score
//! against an investment thesis, and a one-line narrative insight.
//!
//! # Design Philosophy
//!
//! **"Always answer"**
//!
//! - Live extraction when a provider credential is configured
//! - Deterministic demo payloads when none is, or when anything
//!   recoverable fails along the way
//! - Scoring is pure and reproducible; only enrichment touches the
//!   network
//! - Invalid input is the one error callers must handle
//!
//! # Usage
//!
//! ```rust,ignore
//! use enrichment::fetch::PageFetcher;
//! use enrichment::pipeline::Enricher;
//! use enrichment::providers::{Gemini, OpenAI};
//! use enrichment::scoring::{score_company, Thesis};
//!
//! let enricher = Enricher::new(
//!     OpenAI::from_env(),
//!     Some(Gemini::from_env()),
//!     PageFetcher::new(),
//! );
//!
//! let envelope = enricher.enrich("https://acme.example").await?;
//! let result = score_company(&company, Some(&envelope.data), &Thesis::default());
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Enrichment orchestration with provider fallback
//! - [`providers`] - OpenAI and Gemini chat-completion clients
//! - [`scoring`] - Deterministic thesis scoring
//! - [`insight`] - Narrative one-liner derived from signals
//! - [`fetch`] - Page retrieval with timeout and retry
//! - [`reduce`] - HTML to bounded plain text
//! - [`sanitize`] - Input and prompt sanitization
//! - [`security`] - Credential handling
//! - [`demo`] - Deterministic demo payloads
//! - [`testing`] - Mock implementations for testing

pub mod demo;
pub mod error;
pub mod fetch;
pub mod insight;
pub mod pipeline;
pub mod providers;
pub mod reduce;
pub mod sanitize;
pub mod scoring;
pub mod security;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{EnrichError, FetchError, ProviderError};
pub use types::{
    company::CompanyProfile,
    enrichment::{EnrichmentEnvelope, ExtractionRecord},
};

// Re-export the pipeline entry point
pub use pipeline::Enricher;

// Re-export scoring and insight
pub use insight::generate_insight;
pub use scoring::{
    score_company, Confidence, ScoreBreakdown, ScoringResult, Thesis, ThesisWeights,
};

// Re-export fetch and providers
pub use fetch::{Fetch, PageFetcher};
pub use providers::{CompletionProvider, Gemini, OpenAI, ProviderKind};

// Re-export credential handling
pub use security::{ProviderCredentials, SecretString};

// Re-export testing utilities
pub use testing::{MockFetcher, MockProvider};
