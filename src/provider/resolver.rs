// src/provider/resolver.rs — Build the provider set from config and environment

use std::sync::Arc;

use super::anthropic::AnthropicProvider;
use super::openai::OpenAIProvider;
use super::primary::PrimaryProvider;
use super::{AnalysisProvider, HttpTransport, ProviderChain};
use crate::infra::config::ProvidersConfig;

/// Credentials the providers may need. Missing entries leave the matching
/// provider configured but unavailable.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Credentials {
    /// Read `OPENAI_API_KEY` and `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
        }
    }
}

/// All known providers, configured-but-unavailable ones included.
pub fn build_providers(
    config: &ProvidersConfig,
    credentials: &Credentials,
) -> Vec<Arc<dyn AnalysisProvider>> {
    vec![
        Arc::new(PrimaryProvider::new(&config.primary)),
        Arc::new(OpenAIProvider::new(
            &config.openai,
            credentials.openai_api_key.clone(),
        )),
        Arc::new(AnthropicProvider::new(
            &config.anthropic,
            credentials.anthropic_api_key.clone(),
        )),
    ]
}

/// Production chain: HTTP transport, tokio sleeps, configured backoff.
pub fn build_chain(config: &ProvidersConfig, credentials: &Credentials) -> ProviderChain {
    let providers = build_providers(config, credentials);
    let chain = ProviderChain::new(providers, Arc::new(HttpTransport::new()))
        .with_backoff_base(config.backoff_base());
    tracing::debug!(
        providers = ?chain.provider_ids(),
        available = ?chain.available_ids(),
        "Provider chain built"
    );
    chain
}
