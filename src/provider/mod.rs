// src/provider/mod.rs — Analysis provider layer
//
// Each provider knows its own wire contract (request shape and where the
// analysis text lives in the response). Sending the request is the
// transport's job; ordering, retries and failover belong to the chain.

pub mod anthropic;
pub mod chain;
pub mod openai;
pub mod primary;
pub mod resolver;
pub mod retry;
pub mod transport;

use serde_json::Value;
use std::time::Duration;

use crate::infra::errors::LucidraError;

pub use chain::{Analysis, ProviderChain};
pub use transport::{HttpTransport, Transport};

/// Static description of a provider: identity, ordering and retry policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDescriptor {
    pub id: String,
    /// Lower ranks are tried first.
    pub priority: u32,
    pub cost_per_token: f64,
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl ProviderDescriptor {
    pub fn new(
        id: impl Into<String>,
        priority: u32,
        cost_per_token: f64,
        max_attempts: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            priority,
            cost_per_token,
            max_attempts: max_attempts.max(1),
            timeout,
        }
    }

    /// Estimated spend in USD for `tokens` tokens.
    pub fn estimate_cost(&self, tokens: u64) -> f64 {
        tokens as f64 * self.cost_per_token
    }
}

/// A fully built HTTP request for one provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub provider: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

/// One implementation per wire contract.
pub trait AnalysisProvider: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// False when required configuration (usually a credential) is missing.
    /// Unavailable providers are skipped without spending attempts.
    fn is_available(&self) -> bool;

    fn build_request(&self, scenario: &str) -> ProviderRequest;

    /// Pull the analysis text out of a successful response body.
    fn extract_analysis(&self, response: &Value) -> Result<String, LucidraError>;

    fn id(&self) -> &str {
        &self.descriptor().id
    }
}

/// Shared extractor tail: the text must exist and must not be blank.
pub(crate) fn require_text(
    provider: &str,
    field: &str,
    value: Option<&str>,
) -> Result<String, LucidraError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        Some(_) => Err(LucidraError::MalformedResponse {
            provider: provider.to_string(),
            message: format!("{field} is empty"),
        }),
        None => Err(LucidraError::MalformedResponse {
            provider: provider.to_string(),
            message: format!("response has no {field}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_clamps_attempts() {
        let d = ProviderDescriptor::new("x", 1, 0.001, 0, Duration::from_secs(1));
        assert_eq!(d.max_attempts, 1);
    }

    #[test]
    fn test_estimate_cost() {
        let d = ProviderDescriptor::new("x", 1, 0.002, 3, Duration::from_secs(1));
        assert!((d.estimate_cost(500) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("p", "f", Some("ok")).unwrap(), "ok");
        assert!(matches!(
            require_text("p", "f", Some("   ")),
            Err(LucidraError::MalformedResponse { .. })
        ));
        assert!(require_text("p", "f", None).is_err());
    }
}
