// src/infra/errors.rs — Error types for Lucidra

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LucidraError {
    // Provider errors (transient or permanent depending on cause)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Provider '{provider}' returned an unusable response: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("All providers failed")]
    AllProvidersExhausted,

    // Governance
    #[error("Invalid plan table: {0}")]
    InvalidPlanTable(String),

    #[error("Unknown plan '{0}' (expected free, basic or premium)")]
    UnknownPlan(String),

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LucidraError {
    /// Whether the failure looks transient (transport errors, 429, 5xx).
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            LucidraError::Provider {
                retriable: true,
                ..
            } | LucidraError::RateLimited { .. }
        )
    }

    /// Wait the server asked for before the next request, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LucidraError::RateLimited { retry_after_ms, .. } if *retry_after_ms > 0 => {
                Some(Duration::from_millis(*retry_after_ms))
            }
            _ => None,
        }
    }

    /// Provider id carried by the error, if it came from a provider.
    pub fn provider(&self) -> Option<&str> {
        match self {
            LucidraError::Provider { provider, .. }
            | LucidraError::RateLimited { provider, .. }
            | LucidraError::MalformedResponse { provider, .. } => Some(provider),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_classification() {
        let transient = LucidraError::Provider {
            provider: "openai".into(),
            message: "HTTP 503".into(),
            retriable: true,
        };
        let rejected = LucidraError::Provider {
            provider: "openai".into(),
            message: "HTTP 401".into(),
            retriable: false,
        };
        let limited = LucidraError::RateLimited {
            provider: "anthropic".into(),
            retry_after_ms: 5000,
        };
        let malformed = LucidraError::MalformedResponse {
            provider: "primary".into(),
            message: "missing ai_analysis".into(),
        };

        assert!(transient.is_retriable());
        assert!(!rejected.is_retriable());
        assert!(limited.is_retriable());
        assert!(!malformed.is_retriable());
        assert!(!LucidraError::AllProvidersExhausted.is_retriable());
    }

    #[test]
    fn test_retry_after() {
        let limited = LucidraError::RateLimited {
            provider: "openai".into(),
            retry_after_ms: 3_000,
        };
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(3)));

        let zero = LucidraError::RateLimited {
            provider: "openai".into(),
            retry_after_ms: 0,
        };
        assert_eq!(zero.retry_after(), None);
        assert_eq!(LucidraError::AllProvidersExhausted.retry_after(), None);
    }

    #[test]
    fn test_provider_accessor() {
        let err = LucidraError::MalformedResponse {
            provider: "primary".into(),
            message: "empty".into(),
        };
        assert_eq!(err.provider(), Some("primary"));
        assert_eq!(LucidraError::AllProvidersExhausted.provider(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LucidraError::AllProvidersExhausted.to_string(),
            "All providers failed"
        );
        assert_eq!(
            LucidraError::UnknownPlan("gold".into()).to_string(),
            "Unknown plan 'gold' (expected free, basic or premium)"
        );
    }
}
