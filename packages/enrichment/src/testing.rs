//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the enrichment
//! library without making real LLM or network calls.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult, ProviderResult};
use crate::fetch::Fetch;
use crate::providers::{CompletionProvider, ProviderKind, DEFAULT_EXCERPT_CHARS};

/// A mock completion provider for testing.
///
/// Returns scripted responses in order, then falls back to a valid
/// extraction payload. Useful for driving the pipeline through quota
/// fallback and parse failure paths without real API calls.
#[derive(Clone)]
pub struct MockProvider {
    kind: ProviderKind,
    configured: bool,
    excerpt_limit: Option<usize>,

    /// Scripted outcomes, consumed front to back
    script: Arc<RwLock<VecDeque<ProviderResult<String>>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockProviderCall>>>,
}

/// Record of a call made to the mock provider.
#[derive(Debug, Clone)]
pub enum MockProviderCall {
    Complete { system: String, user: String },
}

impl MockProvider {
    /// Create a configured mock that answers with the default payload.
    pub fn new() -> Self {
        Self {
            kind: ProviderKind::OpenAI,
            configured: true,
            excerpt_limit: None,
            script: Arc::new(RwLock::new(VecDeque::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a mock that reports no usable credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Set which provider this mock claims to be.
    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the excerpt budget reported to the pipeline.
    pub fn with_excerpt_limit(mut self, limit: usize) -> Self {
        self.excerpt_limit = Some(limit);
        self
    }

    /// Queue a successful completion.
    pub fn with_response(self, body: impl Into<String>) -> Self {
        self.script.write().unwrap().push_back(Ok(body.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: crate::error::ProviderError) -> Self {
        self.script.write().unwrap().push_back(Err(error));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockProviderCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    /// A well-formed extraction payload for unscripted calls.
    fn default_completion() -> String {
        r#"{"summary":"A technology company.","whatTheyDo":["Builds software"],"keywords":["technology"],"signals":["Active website"]}"#
            .to_string()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn excerpt_limit(&self) -> usize {
        self.excerpt_limit.unwrap_or(DEFAULT_EXCERPT_CHARS)
    }

    async fn complete(&self, system: &str, user: &str) -> ProviderResult<String> {
        self.calls.write().unwrap().push(MockProviderCall::Complete {
            system: system.to_string(),
            user: user.to_string(),
        });

        // Scripted outcome if one is queued, default payload otherwise
        match self.script.write().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(Self::default_completion()),
        }
    }
}

/// A mock fetcher for testing.
///
/// Serves predefined page bodies without network requests.
#[derive(Clone, Default)]
pub struct MockFetcher {
    /// Predefined bodies by URL
    pages: Arc<RwLock<HashMap<String, String>>>,

    /// URLs that should fail, with the failure to produce
    failures: Arc<RwLock<HashMap<String, MockFetchFailure>>>,

    /// URLs fetched, in order
    calls: Arc<RwLock<Vec<String>>>,
}

/// Failure modes a [`MockFetcher`] can script for a URL.
#[derive(Debug, Clone, Copy)]
pub enum MockFetchFailure {
    NotFound,
    AccessDenied,
    BadStatus(u16),
    Timeout,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined page body.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), body.into());
        self
    }

    /// Mark a URL as failing.
    pub fn with_failure(self, url: impl Into<String>, failure: MockFetchFailure) -> Self {
        self.failures.write().unwrap().insert(url.into(), failure);
        self
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(failure) = self.failures.read().unwrap().get(url) {
            return Err(match failure {
                MockFetchFailure::NotFound => FetchError::NotFound {
                    url: url.to_string(),
                },
                MockFetchFailure::AccessDenied => FetchError::AccessDenied {
                    url: url.to_string(),
                },
                MockFetchFailure::BadStatus(status) => FetchError::BadStatus {
                    status: *status,
                    url: url.to_string(),
                },
                MockFetchFailure::Timeout => FetchError::Timeout {
                    url: url.to_string(),
                },
            });
        }

        // Unknown URLs look like missing pages
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    #[tokio::test]
    async fn test_mock_provider_scripted_then_default() {
        let provider = MockProvider::new().with_response(r#"{"summary":"Scripted"}"#);

        let first = provider.complete("sys", "user").await.unwrap();
        assert!(first.contains("Scripted"));

        let second = provider.complete("sys", "user").await.unwrap();
        assert!(second.contains("A technology company"));

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], MockProviderCall::Complete { .. }));
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_error() {
        let provider = MockProvider::new().with_error(ProviderError::QuotaExceeded {
            provider: "mock".to_string(),
        });

        let err = provider.complete("sys", "user").await.unwrap_err();
        assert!(err.is_quota());
    }

    #[test]
    fn test_mock_provider_unconfigured() {
        assert!(!MockProvider::unconfigured().is_configured());
        assert!(MockProvider::new().is_configured());
    }

    #[tokio::test]
    async fn test_mock_provider_clones_share_history() {
        let provider = MockProvider::new();
        let handle = provider.clone();

        provider.complete("sys", "user").await.unwrap();
        assert_eq!(handle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_fetcher_serves_pages() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.example", "<html>A</html>")
            .with_failure("https://b.example", MockFetchFailure::AccessDenied);

        let body = fetcher.fetch("https://a.example").await.unwrap();
        assert_eq!(body, "<html>A</html>");

        let err = fetcher.fetch("https://b.example").await.unwrap_err();
        assert!(matches!(err, FetchError::AccessDenied { .. }));

        let err = fetcher.fetch("https://missing.example").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));

        assert_eq!(fetcher.call_count(), 3);
    }
}
