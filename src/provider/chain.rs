// src/provider/chain.rs — Ordered failover across analysis providers
//
// Candidates are tried in priority order (a preferred provider jumps the
// queue). Unavailable candidates are skipped silently. Each candidate gets its
// own attempt budget, spent on any failure whatever its cause; the first one
// to produce text wins.

use std::sync::Arc;
use std::time::Duration;

use super::retry::{retry_delay, Backoff, Sleeper, Step, TokioSleeper};
use super::{AnalysisProvider, ProviderDescriptor, Transport};
use crate::infra::errors::LucidraError;

/// Analysis text and the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub provider: String,
    pub text: String,
}

pub struct ProviderChain {
    providers: Vec<Arc<dyn AnalysisProvider>>,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    backoff_base: Duration,
}

impl ProviderChain {
    pub fn new(mut providers: Vec<Arc<dyn AnalysisProvider>>, transport: Arc<dyn Transport>) -> Self {
        providers.sort_by_key(|p| p.descriptor().priority);
        Self {
            providers,
            transport,
            sleeper: Arc::new(TokioSleeper),
            backoff_base: Duration::from_secs(1),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Provider ids in priority order.
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Ids of providers whose configuration is complete.
    pub fn available_ids(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.id())
            .collect()
    }

    pub fn descriptor(&self, id: &str) -> Option<&ProviderDescriptor> {
        self.providers
            .iter()
            .map(|p| p.descriptor())
            .find(|d| d.id == id)
    }

    /// Priority order, with `preferred` (if known) moved to the front.
    pub fn candidates(&self, preferred: Option<&str>) -> Vec<Arc<dyn AnalysisProvider>> {
        let mut ordered = self.providers.clone();
        if let Some(id) = preferred {
            if let Some(pos) = ordered.iter().position(|p| p.id() == id) {
                let chosen = ordered.remove(pos);
                ordered.insert(0, chosen);
            } else {
                tracing::debug!(preferred = id, "Preferred provider is not configured");
            }
        }
        ordered
    }

    pub async fn analyze(
        &self,
        scenario: &str,
        preferred: Option<&str>,
    ) -> Result<Analysis, LucidraError> {
        let mut last_error = None;

        for provider in self.candidates(preferred) {
            if !provider.is_available() {
                tracing::debug!(provider = provider.id(), "Skipping provider: missing configuration");
                continue;
            }

            tracing::debug!(provider = provider.id(), "Attempting analysis");
            match self.call_with_retries(provider.as_ref(), scenario).await {
                Ok(text) => {
                    tracing::info!(provider = provider.id(), "Analysis succeeded");
                    return Ok(Analysis {
                        provider: provider.id().to_string(),
                        text,
                    });
                }
                Err(e) => {
                    tracing::warn!(provider = provider.id(), "Provider failed, trying next: {}", e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(LucidraError::AllProvidersExhausted))
    }

    async fn call_with_retries(
        &self,
        provider: &dyn AnalysisProvider,
        scenario: &str,
    ) -> Result<String, LucidraError> {
        let descriptor = provider.descriptor();
        let mut backoff = Backoff::new(descriptor.max_attempts, self.backoff_base);

        loop {
            let request = provider.build_request(scenario);
            let result = match self.transport.post_json(&request, descriptor.timeout).await {
                Ok(body) => provider.extract_analysis(&body),
                Err(e) => Err(e),
            };

            let error = match result {
                Ok(text) => return Ok(text),
                Err(e) => e,
            };

            match backoff.after_failure() {
                Step::GiveUp => return Err(error),
                Step::Retry(computed) => {
                    let delay = retry_delay(computed, error.retry_after());
                    tracing::warn!(
                        provider = provider.id(),
                        attempt = backoff.failed_attempts(),
                        max_attempts = backoff.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        transient = error.is_retriable(),
                        "Retrying after error: {}",
                        error
                    );
                    self.sleeper.sleep(delay).await;
                }
            }
        }
    }
}
