//! Fetching citation pages with retry and backoff.
//!
//! The HTTP layer sits behind the [`Fetcher`] trait so the updater can be
//! driven by a scripted source in tests. [`fetch_with_retry`] owns the retry
//! state machine: attempt count plus a backoff duration chosen from the kind
//! of failure.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 429, or the 403 the citation source answers with when it throttles.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.status, 403 | 429)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

pub trait Fetcher {
    /// Perform one GET. Only transport failures are errors; any HTTP status
    /// comes back as a response.
    fn get(&self, url: &str) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send;
}

// ============================================================================
// HTTP Fetcher
// ============================================================================

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

// ============================================================================
// Retry Policy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffKind {
    /// The source answered 429 or 403.
    RateLimited,
    /// Transport failure or 5xx.
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub rate_limited_backoff: Duration,
    pub network_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limited_backoff: Duration::from_secs(10),
            network_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Wait before the attempt following `attempt` (zero-based): base × 2^attempt.
    pub fn backoff(&self, kind: BackoffKind, attempt: u32) -> Duration {
        let base = match kind {
            BackoffKind::RateLimited => self.rate_limited_backoff,
            BackoffKind::Network => self.network_backoff,
        };
        base.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Fetch `url`, retrying transient failures. Returns the body of the first
/// successful response, or `None` once attempts are exhausted or the source
/// answered with a non-retryable status.
pub async fn fetch_with_retry<F: Fetcher>(
    fetcher: &F,
    url: &str,
    policy: &RetryPolicy,
) -> Option<String> {
    let attempts = policy.max_attempts.max(1);

    for attempt in 0..attempts {
        let is_last = attempt + 1 == attempts;

        let kind = match fetcher.get(url).await {
            Ok(response) if response.is_success() => return Some(response.body),
            Ok(response) if response.is_rate_limited() => BackoffKind::RateLimited,
            Ok(response) if response.is_server_error() => {
                warn!(
                    "Attempt {}/{} got HTTP {}",
                    attempt + 1,
                    attempts,
                    response.status
                );
                BackoffKind::Network
            }
            Ok(response) => {
                warn!("HTTP {} from {}, not retrying", response.status, url);
                return None;
            }
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt + 1, attempts, e);
                BackoffKind::Network
            }
        };

        if is_last {
            break;
        }

        let wait = policy.backoff(kind, attempt);
        match kind {
            BackoffKind::RateLimited => warn!(
                "Rate limited. Waiting {}ms before retry {}/{}...",
                wait.as_millis(),
                attempt + 1,
                attempts
            ),
            BackoffKind::Network => debug!("Waiting {}ms before retry", wait.as_millis()),
        }
        sleep(wait).await;
    }

    None
}
