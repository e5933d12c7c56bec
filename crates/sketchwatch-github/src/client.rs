//! GitHub API client with shared rate limiting and bounded retry.

use crate::config::{FetchLimits, RetryConfig};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client as HttpClient;
use sketchwatch_core::{AuditError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The GitHub API base URL
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub commits API client.
///
/// Cheap to clone; every clone shares one HTTP pool and, more importantly,
/// one rate limiter, so a whole batch run against a single credential stays
/// inside that credential's quota no matter how the client is passed around.
#[derive(Clone)]
pub struct GithubClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    token: Option<String>,
    base_url: String,
    retry_config: RetryConfig,
    limits: FetchLimits,
    limiter: DefaultDirectRateLimiter,
}

impl GithubClient {
    /// Create a new client with the given bearer token and default settings
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        GithubClientBuilder::new(token).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(token: Option<String>) -> GithubClientBuilder {
        GithubClientBuilder::new(token)
    }

    /// API base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Pagination and quota caps
    #[must_use]
    pub(crate) fn limits(&self) -> &FetchLimits {
        &self.inner.limits
    }

    /// The bearer token, or `CredentialMissing` if the client has none.
    pub(crate) fn require_token(&self) -> Result<&str> {
        self.inner
            .token
            .as_deref()
            .ok_or(AuditError::CredentialMissing)
    }

    /// Perform an authenticated GET, retrying rate-limit rejections with
    /// bounded exponential backoff. Returns the raw response on 2xx.
    pub(crate) async fn get_raw(&self, url: &str) -> Result<reqwest::Response> {
        let token = self.require_token()?;
        let retry = &self.inner.retry_config;

        let mut attempt = 0;
        loop {
            self.inner.limiter.until_ready().await;
            debug!(url = %url, attempt, "GET request");

            let response = self
                .inner
                .http
                .get(url)
                .bearer_auth(token)
                .header(reqwest::header::ACCEPT, "application/vnd.github+json")
                .send()
                .await
                .map_err(|e| AuditError::Http(e.to_string()))?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if is_rate_limited(&response) {
                let retry_after = retry_after_secs(&response);
                if retry.retry_on_rate_limit && attempt < retry.max_retries {
                    let wait = retry_after
                        .map_or_else(|| retry.backoff_for(attempt), Duration::from_secs);
                    warn!(wait_ms = wait.as_millis() as u64, attempt, "rate limited, backing off");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    continue;
                }
                return Err(AuditError::RateLimited { retry_after });
            }

            let message = response.text().await.unwrap_or_default();
            return Err(AuditError::RemoteFetch {
                status: status.as_u16(),
                message: extract_api_message(&message),
            });
        }
    }
}

/// GitHub signals rate limiting as 429, or 403 with the quota exhausted.
fn is_rate_limited(response: &reqwest::Response) -> bool {
    let status = response.status().as_u16();
    status == 429
        || (status == 403
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0"))
}

fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Pull the `message` field out of a GitHub error body, if it is one.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// Builder for configuring a [`GithubClient`]
pub struct GithubClientBuilder {
    token: Option<String>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
    limits: FetchLimits,
}

impl GithubClientBuilder {
    /// Create a new builder with the given bearer token
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("sketchwatch/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
            limits: FetchLimits::default(),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set pagination and request-quota caps
    #[must_use]
    pub fn limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> GithubClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        let limiter = RateLimiter::direct(Quota::per_second(self.limits.requests_per_second));

        GithubClient {
            inner: Arc::new(ClientInner {
                http,
                token: self.token,
                base_url: self.base_url,
                retry_config: self.retry_config,
                limits: self.limits,
                limiter,
            }),
        }
    }
}
