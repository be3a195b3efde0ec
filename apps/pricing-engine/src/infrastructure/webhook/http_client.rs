//! HTTP client wrapper with retry logic.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::config::{RetryConfig, WebhookClientConfig};
use super::error::WebhookError;

/// JSON-over-HTTP client with a timeout and bounded exponential backoff.
#[derive(Debug, Clone)]
pub struct WebhookHttpClient {
    client: Client,
    retry_config: RetryConfig,
}

impl WebhookHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &WebhookClientConfig) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WebhookError::Client(e.to_string()))?;

        Ok(Self {
            client,
            retry_config: config.retry.clone(),
        })
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// An empty success body decodes to `Value::Null`.
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<Value, WebhookError> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = self.send(request).await?;
        decode_json(response).await
    }

    /// GET a URL with query parameters and decode the JSON response.
    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, WebhookError> {
        let response = self.send(self.client.get(url).query(query)).await?;
        decode_json(response).await
    }

    /// GET a URL and return the raw body.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, WebhookError> {
        let response = self.send(self.client.get(url)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WebhookError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Send with retries. Returns the first success response.
    async fn send(&self, request: RequestBuilder) -> Result<Response, WebhookError> {
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            let attempt = request
                .try_clone()
                .ok_or_else(|| WebhookError::Client("request body is not retryable".to_string()))?;

            let response = match attempt.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(WebhookError::Network(e.to_string()));
                }
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let body = response.text().await.unwrap_or_default();

            let delay = match categorize_status(status) {
                ErrorCategory::RateLimited => backoff
                    .next_backoff()
                    .map(|d| retry_after.map_or(d, Duration::from_secs)),
                ErrorCategory::Retryable => backoff.next_backoff(),
                ErrorCategory::NonRetryable => None,
            };

            if let Some(delay) = delay {
                tracing::warn!(
                    status = status.as_u16(),
                    delay_ms = delay.as_millis(),
                    attempt = backoff.attempt,
                    "Retryable HTTP status, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }
    }
}

async fn decode_json(response: Response) -> Result<Value, WebhookError> {
    let text = response
        .text()
        .await
        .map_err(|e| WebhookError::Network(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| WebhookError::JsonParse(e.to_string()))
}

/// Error category for determining retry behavior.
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Exponential backoff calculator.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(backoff)
    }
}
