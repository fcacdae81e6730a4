//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Every variant except `EnrichError::InvalidInput` is recoverable:
//! the pipeline answers it with a demo envelope instead of failing.

use thiserror::Error;

/// Errors that can occur during enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Input failed validation. The only error surfaced to callers.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Page retrieval failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Page text too thin to extract anything meaningful from
    #[error("insufficient content: {chars} chars after reduction")]
    InsufficientContent { chars: usize },

    /// Provider output contained no parseable JSON object
    #[error("extraction parse error: {reason}")]
    ExtractionParse { reason: String },

    /// LLM provider call failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl EnrichError {
    /// Whether the pipeline may answer this error with demo data.
    ///
    /// Invalid input is the caller's problem; everything else is ours
    /// and degrades gracefully.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidInput { .. })
    }
}

/// Errors that can occur while retrieving a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, TLS, body read)
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the fetch timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Server returned 404
    #[error("page not found: {url}")]
    NotFound { url: String },

    /// Server returned 403
    #[error("access denied: {url}")]
    AccessDenied { url: String },

    /// Any other non-success status
    #[error("HTTP {status} fetching: {url}")]
    BadStatus { status: u16, url: String },
}

impl FetchError {
    /// Whether one more attempt is worth making.
    ///
    /// Transport failures and timeouts are often transient; a definitive
    /// HTTP status is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Errors from LLM provider clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Quota or rate limit exhausted. Triggers the fallback provider.
    #[error("quota exceeded for {provider}")]
    QuotaExceeded { provider: String },

    /// No usable API key configured for the provider
    #[error("missing credential for {provider}")]
    MissingCredential { provider: String },

    /// Provider returned a non-success status
    #[error("provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Network failure reaching the provider
    #[error("provider network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider response had an unexpected shape
    #[error("provider response parse error: {reason}")]
    Parse { reason: String },
}

impl ProviderError {
    /// Whether this failure should trigger the fallback provider.
    ///
    /// HTTP 429 is the reliable signal. The substring check catches
    /// providers that bury quota exhaustion in an error body instead of
    /// the status line; upstream wording can change, so the status path
    /// is checked first.
    pub fn is_quota(&self) -> bool {
        match self {
            Self::QuotaExceeded { .. } => true,
            Self::Http { status: 429, .. } => true,
            other => {
                let text = other.to_string().to_lowercase();
                text.contains("quota") || text.contains("429") || text.contains("billing")
            }
        }
    }
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_classification_by_variant() {
        let err = ProviderError::QuotaExceeded {
            provider: "openai".to_string(),
        };
        assert!(err.is_quota());
    }

    #[test]
    fn test_quota_classification_by_status() {
        let err = ProviderError::Http {
            status: 429,
            message: "too many requests".to_string(),
        };
        assert!(err.is_quota());
    }

    #[test]
    fn test_quota_classification_by_message_substring() {
        let err = ProviderError::Http {
            status: 400,
            message: "You exceeded your current quota, please check your plan".to_string(),
        };
        assert!(err.is_quota());

        let err = ProviderError::Parse {
            reason: "billing hard limit reached".to_string(),
        };
        assert!(err.is_quota());
    }

    #[test]
    fn test_non_quota_errors_not_classified() {
        let err = ProviderError::Http {
            status: 500,
            message: "internal server error".to_string(),
        };
        assert!(!err.is_quota());

        let err = ProviderError::Parse {
            reason: "no choices in response".to_string(),
        };
        assert!(!err.is_quota());
    }

    #[test]
    fn test_only_invalid_input_is_unrecoverable() {
        let invalid = EnrichError::InvalidInput {
            reason: "empty url".to_string(),
        };
        assert!(!invalid.is_recoverable());

        assert!(EnrichError::InsufficientContent { chars: 12 }.is_recoverable());
        assert!(EnrichError::Fetch(FetchError::NotFound {
            url: "https://example.com".to_string(),
        })
        .is_recoverable());
        assert!(EnrichError::ExtractionParse {
            reason: "no JSON object".to_string(),
        }
        .is_recoverable());
    }
}
