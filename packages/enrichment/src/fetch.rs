//! Page retrieval with timeout and a single retry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};

/// Seam for page retrieval.
///
/// The live implementation is [`PageFetcher`]; tests substitute a mock
/// that serves canned pages without touching the network.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieve the raw HTML body at `url`.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// Per-request timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Backoff before the single retry.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Retries after the first attempt. Transient failures get exactly one
/// more try; HTTP status errors are final.
const MAX_FETCH_RETRIES: u32 = 1;

/// Bodies above this size are logged, not rejected.
const BODY_WARN_BYTES: usize = 5 * 1024 * 1024;

/// Fetches company pages over HTTP.
///
/// Wraps a `reqwest::Client` with the retrieval policy the pipeline
/// expects: GET with a browser-like User-Agent, 10 second timeout, one
/// retry after a 1 second backoff on transport failure or timeout, and
/// typed errors for the statuses the pipeline reacts to.
///
/// # Example
///
/// ```rust,ignore
/// use enrichment::fetch::PageFetcher;
///
/// let fetcher = PageFetcher::new();
/// let html = fetcher.fetch("https://example.com").await?;
/// ```
pub struct PageFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher {
    /// Create a fetcher with the default timeout and User-Agent.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client (e.g. with a shorter timeout in tests).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Fetch a URL and return the response body.
    ///
    /// Transport failures and timeouts are retried once after
    /// [`RETRY_BACKOFF`]; status errors return immediately.
    pub async fn fetch(&self, url: &str) -> FetchResult<String> {
        let started = Instant::now();
        let mut retries = 0u32;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => {
                    info!(
                        url = %url,
                        duration_ms = started.elapsed().as_millis() as u64,
                        retries,
                        bytes = body.len(),
                        "page fetched"
                    );
                    if body.len() > BODY_WARN_BYTES {
                        warn!(url = %url, bytes = body.len(), "page body unusually large");
                    }
                    return Ok(body);
                }
                Err(err) if err.is_retryable() && retries < MAX_FETCH_RETRIES => {
                    retries += 1;
                    warn!(url = %url, error = %err, attempt = retries, "fetch failed, retrying");
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(err) => {
                    warn!(
                        url = %url,
                        duration_ms = started.elapsed().as_millis() as u64,
                        retries,
                        error = %err,
                        "fetch failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| classify_transport(url, e))?;

        match response.status().as_u16() {
            404 => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
            403 => Err(FetchError::AccessDenied {
                url: url.to_string(),
            }),
            code if !response.status().is_success() => Err(FetchError::BadStatus {
                status: code,
                url: url.to_string(),
            }),
            _ => response.text().await.map_err(|e| classify_transport(url, e)),
        }
    }
}

#[async_trait]
impl Fetch for PageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        PageFetcher::fetch(self, url).await
    }
}

fn classify_transport(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: err,
        }
    }
}
