//! LLM provider clients.
//!
//! The pipeline talks to providers through [`CompletionProvider`], one
//! system + user exchange at a time. Implementations wrap a provider's
//! REST API and normalize failures into `ProviderError`, mapping quota
//! exhaustion to `ProviderError::QuotaExceeded` so the pipeline can
//! fall back to the secondary provider.

pub mod gemini;
pub mod openai;

pub use gemini::Gemini;
pub use openai::OpenAI;

use async_trait::async_trait;

use crate::error::ProviderResult;

/// Prompt excerpt budget in characters, shared by the current providers.
pub const DEFAULT_EXCERPT_CHARS: usize = 12_000;

/// Identifies a provider in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat-completion capable LLM provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Which provider this is, for logs and errors.
    fn kind(&self) -> ProviderKind;

    /// Whether a usable credential is loaded. Pipelines check this
    /// before fetching anything so unconfigured deployments stay fully
    /// offline.
    fn is_configured(&self) -> bool {
        true
    }

    /// How much page text this provider accepts in a prompt, in characters.
    fn excerpt_limit(&self) -> usize {
        DEFAULT_EXCERPT_CHARS
    }

    /// Send one system + user exchange and return the raw model text.
    async fn complete(&self, system: &str, user: &str) -> ProviderResult<String>;
}
