// src/provider/transport.rs — JSON-over-HTTP transport for provider calls

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::ProviderRequest;
use crate::infra::errors::LucidraError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Sends one provider request and returns the parsed JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        request: &ProviderRequest,
        timeout: Duration,
    ) -> Result<Value, LucidraError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        request: &ProviderRequest,
        timeout: Duration,
    ) -> Result<Value, LucidraError> {
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(timeout)
            .header("content-type", "application/json")
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| LucidraError::Provider {
            provider: request.provider.clone(),
            message: e.to_string(),
            retriable: e.is_timeout() || e.is_connect() || e.is_request(),
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let header = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok());
            return Err(rate_limited(&request.provider, header));
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LucidraError::Provider {
                provider: request.provider.clone(),
                message: format!("HTTP {}: {}", status, error_body),
                retriable: status.is_server_error(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LucidraError::MalformedResponse {
                provider: request.provider.clone(),
                message: format!("Failed to parse response: {}", e),
            })
    }
}

/// Map a 429 to `RateLimited`. `Retry-After` is read as whole seconds; a
/// missing or non-numeric value means 5 seconds.
fn rate_limited(provider: &str, retry_after: Option<&str>) -> LucidraError {
    let secs = retry_after
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
    LucidraError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms: secs.saturating_mul(1000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retry_after_ms(header: Option<&str>) -> u64 {
        match rate_limited("openai", header) {
            LucidraError::RateLimited { retry_after_ms, .. } => retry_after_ms,
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_rate_limited_reads_header() {
        assert_eq!(retry_after_ms(Some("12")), 12_000);
        assert_eq!(retry_after_ms(Some(" 3 ")), 3_000);
    }

    #[test]
    fn test_rate_limited_defaults() {
        assert_eq!(retry_after_ms(Some("Wed, 21 Oct 2026 07:28:00 GMT")), 5_000);
        assert_eq!(retry_after_ms(None), 5_000);
    }

    #[test]
    fn test_huge_retry_after_saturates() {
        assert_eq!(retry_after_ms(Some("18446744073709551")), u64::MAX);
    }
}
