//! Retrying HTTP client used by CRM adapters
//!
//! Connection failures, timeouts and 5xx responses are retried with
//! exponential backoff. A 429 is retried after its `Retry-After` delay when
//! that delay fits under `max_retry_after`; otherwise the response goes back
//! to the caller, which maps it to `DealScopeError::RateLimited`.

use std::time::Duration;

use dealscope_domain::DealScopeError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// What to do after one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Return,
    RetryAfter(Duration),
}

/// Attempt budget and wait schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RetryPolicy {
    max_attempts: usize,
    base_backoff: Duration,
    max_retry_after: Duration,
}

impl RetryPolicy {
    /// Doubling backoff; `retry` counts from 1.
    fn backoff(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << exponent)
    }

    fn has_budget(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }

    /// Decision for a response received on `attempt` (counting from 1).
    fn after_response(&self, attempt: usize, status: StatusCode, retry_after: Option<u64>) -> Next {
        if !self.has_budget(attempt) {
            return Next::Return;
        }
        if status.is_server_error() {
            return Next::RetryAfter(self.backoff(attempt));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return match retry_after.map(Duration::from_secs) {
                Some(wait) if wait <= self.max_retry_after => Next::RetryAfter(wait),
                Some(_) => Next::Return,
                None => Next::RetryAfter(self.backoff(attempt)),
            };
        }
        Next::Return
    }

    /// Decision for a transport failure on `attempt`.
    fn after_error(&self, attempt: usize, err: &reqwest::Error) -> Next {
        let transient = err.is_timeout() || err.is_connect() || err.is_request();
        if transient && self.has_budget(attempt) {
            Next::RetryAfter(self.backoff(attempt))
        } else {
            Next::Return
        }
    }
}

/// HTTP client with built-in retry and timeout support.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a request, retrying transient failures.
    ///
    /// Error statuses that are not retried (or that exhausted the budget) are
    /// returned as responses; only transport failures become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, DealScopeError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    DealScopeError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(|err| DealScopeError::from(InfraError::from(err)))?;
            let method = request.method().clone();
            let url = request.url().clone();

            let next = match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "HTTP response");
                    match self.policy.after_response(attempt, status, retry_after_secs(&response)) {
                        Next::Return => return Ok(response),
                        retry => retry,
                    }
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    match self.policy.after_error(attempt, &err) {
                        Next::Return => return Err(InfraError::from(err).into()),
                        retry => retry,
                    }
                }
            };

            if let Next::RetryAfter(wait) = next {
                warn!(attempt, %url, wait_ms = wait.as_millis() as u64, "retrying HTTP request");
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    policy: RetryPolicy,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            policy: RetryPolicy {
                max_attempts: 3,
                base_backoff: Duration::from_millis(200),
                max_retry_after: Duration::from_secs(10),
            },
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries), at least 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.policy.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.policy.base_backoff = backoff;
        self
    }

    /// Longest `Retry-After` the client sleeps through before handing the
    /// 429 back to the caller.
    pub fn max_retry_after(mut self, limit: Duration) -> Self {
        self.policy.max_retry_after = limit;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, DealScopeError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder.build().map_err(|err| DealScopeError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, policy: self.policy })
    }
}

/// `Retry-After` in whole seconds; HTTP-date values are not supported.
pub fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
