// src/usage/session.rs — Per-client usage session and its read-only snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::{Plan, PlanLimits};

/// Usage record for one client, keyed by an opaque token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub tokens_used: u64,
    pub calls_used: u64,
    pub plan: Plan,
    pub ai_enabled: bool,
    pub opted_in: bool,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, plan: Plan, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            tokens_used: 0,
            calls_used: 0,
            plan,
            ai_enabled: false,
            opted_in: false,
            created_at: now,
            last_used_at: now,
        }
    }

    pub fn tokens_exhausted(&self, limits: &PlanLimits) -> bool {
        self.tokens_used >= limits.max_tokens
    }

    pub fn calls_exhausted(&self, limits: &PlanLimits) -> bool {
        self.calls_used >= limits.max_calls
    }

    pub fn within_limits(&self, limits: &PlanLimits) -> bool {
        !self.tokens_exhausted(limits) && !self.calls_exhausted(limits)
    }

    /// Re-derive `ai_enabled` from consent and the current ceilings.
    pub fn refresh_ai_enabled(&mut self, limits: &PlanLimits) {
        self.ai_enabled = self.opted_in && self.within_limits(limits);
    }

    pub fn snapshot(&self, limits: &PlanLimits) -> UsageSnapshot {
        UsageSnapshot {
            session_id: self.token.clone(),
            plan: self.plan,
            tokens_used: self.tokens_used,
            tokens_remaining: limits.max_tokens.saturating_sub(self.tokens_used),
            tokens_limit: limits.max_tokens,
            calls_used: self.calls_used,
            calls_remaining: limits.max_calls.saturating_sub(self.calls_used),
            calls_limit: limits.max_calls,
            is_ai_enabled: self.ai_enabled,
            user_opted_in: self.opted_in,
            token_usage_percentage: percentage(self.tokens_used, limits.max_tokens),
            call_usage_percentage: percentage(self.calls_used, limits.max_calls),
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}

fn percentage(used: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 100.0;
    }
    (used as f64 / limit as f64 * 100.0).min(100.0)
}

/// Projection of a session's counters handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub session_id: String,
    pub plan: Plan,
    pub tokens_used: u64,
    pub tokens_remaining: u64,
    pub tokens_limit: u64,
    pub calls_used: u64,
    pub calls_remaining: u64,
    pub calls_limit: u64,
    pub is_ai_enabled: bool,
    pub user_opted_in: bool,
    pub token_usage_percentage: f64,
    pub call_usage_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

/// Source of "now" for session timestamps and expiry sweeps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mints opaque session tokens for clients that arrive without one.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// `session_<unix millis>_<9 random chars>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let random = uuid::Uuid::new_v4().simple().to_string();
        format!("session_{}_{}", Utc::now().timestamp_millis(), &random[..9])
    }
}
