// src/core/service.rs — Scenario analysis entry point
//
// Composes the usage governor, the provider chain and the fallback coach:
// check quota, ask the providers, record what was spent, and fall back to
// the coach whenever AI is refused or fails. Callers always get text back.

use std::sync::Arc;
use std::time::Duration;

use super::types::{status_text, ScenarioOutcome, ToggleOutcome, UsageStatus};
use crate::coach;
use crate::infra::config::Config;
use crate::provider::resolver::{self, Credentials};
use crate::provider::ProviderChain;
use crate::usage::{
    AiStatus, DenialReason, Plan, RandomTokenGenerator, TokenGenerator, UsageGovernor,
};

/// Rough token count for a piece of text: one token per four characters.
pub fn estimate_tokens(text: &str) -> u64 {
    text.chars().count().div_ceil(4) as u64
}

pub struct ScenarioService {
    governor: Arc<UsageGovernor>,
    chain: Arc<ProviderChain>,
    tokens: Arc<dyn TokenGenerator>,
    default_plan: Plan,
    preferred_provider: Option<String>,
}

impl ScenarioService {
    pub fn new(governor: Arc<UsageGovernor>, chain: Arc<ProviderChain>) -> Self {
        Self {
            governor,
            chain,
            tokens: Arc::new(RandomTokenGenerator),
            default_plan: Plan::default(),
            preferred_provider: None,
        }
    }

    /// In-memory sessions, providers from config plus `credentials`.
    pub fn from_config(config: &Config, credentials: &Credentials) -> Self {
        let governor = Arc::new(UsageGovernor::in_memory(config.plans.clone()));
        let chain = Arc::new(resolver::build_chain(&config.providers, credentials));
        Self::new(governor, chain)
            .with_default_plan(config.sessions.default_plan)
            .with_preferred_provider(config.providers.preferred.clone())
    }

    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_default_plan(mut self, plan: Plan) -> Self {
        self.default_plan = plan;
        self
    }

    pub fn with_preferred_provider(mut self, provider: Option<String>) -> Self {
        self.preferred_provider = provider;
        self
    }

    pub fn governor(&self) -> &Arc<UsageGovernor> {
        &self.governor
    }

    pub fn chain(&self) -> &Arc<ProviderChain> {
        &self.chain
    }

    /// Resolve the caller's session: mint a token when none was sent, create
    /// the session when the token is unknown. Returns the token to echo back.
    pub fn ensure_session(&self, token: Option<&str>) -> String {
        let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.to_string(),
            None => self.tokens.generate(),
        };
        self.governor.create_session(&token, self.default_plan);
        token
    }

    pub fn can_use_ai(&self, token: &str) -> AiStatus {
        self.governor.can_use_ai(token)
    }

    pub async fn analyze_scenario(&self, token: Option<&str>, scenario: &str) -> ScenarioOutcome {
        let session_token = self.ensure_session(token);
        let status = self.governor.can_use_ai(&session_token);

        if status.can_use {
            match self
                .chain
                .analyze(scenario, self.preferred_provider.as_deref())
                .await
            {
                Ok(analysis) => {
                    let spent = estimate_tokens(&analysis.text);
                    self.governor.record_usage(&session_token, spent);
                    let estimated_cost = self
                        .chain
                        .descriptor(&analysis.provider)
                        .map(|d| d.estimate_cost(spent));
                    tracing::info!(
                        session = %session_token,
                        provider = %analysis.provider,
                        tokens = spent,
                        cost_usd = estimated_cost.unwrap_or_default(),
                        "AI analysis recorded"
                    );
                    return ScenarioOutcome {
                        usage: self.governor.usage_snapshot(&session_token),
                        ai_status: status_text(&status),
                        session_token,
                        analysis: analysis.text,
                        used_ai: true,
                        provider: Some(analysis.provider),
                        estimated_cost,
                        coaching: None,
                        upgrade_message: None,
                    };
                }
                Err(e) => {
                    tracing::warn!(session = %session_token, "AI analysis failed, using fallback coach: {}", e);
                }
            }
        } else {
            tracing::debug!(session = %session_token, reason = %status_text(&status), "AI not used");
        }

        let coaching = coach::analyze(scenario);
        let upgrade_message = match status.reason {
            Some(DenialReason::TokenLimitExceeded { .. })
            | Some(DenialReason::CallLimitExceeded { .. }) => status
                .usage
                .as_ref()
                .map(|u| coach::upgrade_message(u.plan).to_string()),
            _ => None,
        };

        ScenarioOutcome {
            usage: self.governor.usage_snapshot(&session_token),
            ai_status: status_text(&status),
            session_token,
            analysis: coaching.analysis.clone(),
            used_ai: false,
            provider: None,
            estimated_cost: None,
            coaching: Some(coaching),
            upgrade_message,
        }
    }

    pub fn opt_in(&self, token: Option<&str>) -> ToggleOutcome {
        let session_token = self.ensure_session(token);
        let success = self.governor.opt_in(&session_token);
        self.toggle_outcome(session_token, success)
    }

    pub fn opt_out(&self, token: Option<&str>) -> ToggleOutcome {
        let session_token = self.ensure_session(token);
        let success = self.governor.opt_out(&session_token);
        self.toggle_outcome(session_token, success)
    }

    fn toggle_outcome(&self, session_token: String, success: bool) -> ToggleOutcome {
        ToggleOutcome {
            usage: self.governor.usage_snapshot(&session_token),
            session_token,
            success,
        }
    }

    pub fn usage_status(&self, token: Option<&str>) -> UsageStatus {
        let session_token = self.ensure_session(token);
        let status = self.governor.can_use_ai(&session_token);
        UsageStatus {
            can_use_ai: status.can_use,
            ai_status: status_text(&status),
            usage: self.governor.usage_snapshot(&session_token),
            session_token,
        }
    }

    pub fn coaching_tips(&self) -> Vec<String> {
        coach::coaching_tips()
    }

    /// Periodically purge sessions idle for more than `max_age_hours`.
    pub fn spawn_sweeper(
        &self,
        interval: Duration,
        max_age_hours: u64,
    ) -> tokio::task::JoinHandle<()> {
        let governor = Arc::clone(&self.governor);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                governor.sweep_expired(max_age_hours);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::HttpTransport;
    use crate::usage::PlanTable;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingTokens(AtomicU32);

    impl TokenGenerator for CountingTokens {
        fn generate(&self) -> String {
            format!("tok-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    /// No providers at all: every AI attempt exhausts immediately.
    fn offline_service() -> ScenarioService {
        let governor = Arc::new(UsageGovernor::in_memory(PlanTable::default()));
        let chain = Arc::new(ProviderChain::new(vec![], Arc::new(HttpTransport::new())));
        ScenarioService::new(governor, chain)
            .with_token_generator(Arc::new(CountingTokens(AtomicU32::new(0))))
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(200)), 50);
    }

    #[test]
    fn test_ensure_session_mints_when_missing() {
        let svc = offline_service();
        assert_eq!(svc.ensure_session(None), "tok-0");
        assert_eq!(svc.ensure_session(Some("  ")), "tok-1");
        assert!(svc.governor().get_session("tok-0").is_some());
    }

    #[test]
    fn test_ensure_session_reuses_known_token() {
        let svc = offline_service();
        let t = svc.ensure_session(Some("client-abc"));
        assert_eq!(t, "client-abc");
        svc.governor().record_usage("client-abc", 7);
        svc.ensure_session(Some("client-abc"));
        assert_eq!(svc.governor().get_session("client-abc").unwrap().tokens_used, 7);
    }

    #[test]
    fn test_default_plan_applies_to_new_sessions() {
        let svc = offline_service().with_default_plan(Plan::Premium);
        let t = svc.ensure_session(None);
        assert_eq!(svc.governor().get_session(&t).unwrap().plan, Plan::Premium);
    }

    #[tokio::test]
    async fn test_opted_out_gets_fallback() {
        let svc = offline_service();
        let out = svc
            .analyze_scenario(None, "How should we plan our budget for next year?")
            .await;
        assert!(!out.used_ai);
        assert!(!out.analysis.is_empty());
        assert_eq!(out.ai_status, "User has not opted in to AI");
        assert!(out.coaching.as_ref().unwrap().is_fallback);
        assert!(out.upgrade_message.is_none());
        assert_eq!(out.usage.unwrap().calls_used, 0);
    }

    #[tokio::test]
    async fn test_provider_exhaustion_falls_back_without_charging() {
        let svc = offline_service();
        let token = svc.opt_in(None).session_token;
        let out = svc.analyze_scenario(Some(&token), "Budget review").await;
        assert!(!out.used_ai);
        assert_eq!(out.ai_status, "Available");
        assert!(!out.analysis.is_empty());
        let usage = out.usage.unwrap();
        assert_eq!(usage.calls_used, 0);
        assert_eq!(usage.tokens_used, 0);
    }

    #[test]
    fn test_opt_in_and_out() {
        let svc = offline_service();
        let on = svc.opt_in(Some("s"));
        assert!(on.success);
        assert!(on.usage.as_ref().unwrap().user_opted_in);
        assert!(svc.usage_status(Some("s")).can_use_ai);

        let off = svc.opt_out(Some("s"));
        assert!(off.success);
        assert!(!off.usage.unwrap().is_ai_enabled);
        let status = svc.usage_status(Some("s"));
        assert!(!status.can_use_ai);
        assert_eq!(status.ai_status, "User has not opted in to AI");
    }

    #[tokio::test]
    async fn test_sweeper_runs() {
        let svc = offline_service();
        let handle = svc.spawn_sweeper(Duration::from_millis(10), 24);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!handle.is_finished());
        handle.abort();
    }
}
