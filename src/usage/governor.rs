// src/usage/governor.rs — Per-session AI quota governance
//
// Decides whether a session may reach an AI provider and records what each
// provider call consumed. Ceilings come from the plan table; once either
// ceiling is met the session's AI flag is switched off until the plan changes.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use super::plan::{Plan, PlanTable};
use super::session::{Clock, Session, SystemClock, UsageSnapshot};
use super::store::{lock, MemoryStore, SessionStore};

/// Larger ages are clamped; nothing lives that long anyway.
const MAX_SWEEP_AGE_HOURS: u64 = 1_000_000;

/// Why a session was refused AI access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    SessionNotFound,
    NotOptedIn,
    TokenLimitExceeded { limit: u64 },
    CallLimitExceeded { limit: u64 },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::SessionNotFound => f.write_str("Session not found"),
            DenialReason::NotOptedIn => f.write_str("User has not opted in to AI"),
            DenialReason::TokenLimitExceeded { limit } => {
                write!(f, "Token limit exceeded ({limit})")
            }
            DenialReason::CallLimitExceeded { limit } => {
                write!(f, "Call limit exceeded ({limit})")
            }
        }
    }
}

impl Serialize for DenialReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Answer to "may this session use AI right now?".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStatus {
    pub can_use: bool,
    pub reason: Option<DenialReason>,
    pub usage: Option<UsageSnapshot>,
}

impl AiStatus {
    fn allowed(usage: UsageSnapshot) -> Self {
        Self {
            can_use: true,
            reason: None,
            usage: Some(usage),
        }
    }

    fn denied(reason: DenialReason, usage: Option<UsageSnapshot>) -> Self {
        Self {
            can_use: false,
            reason: Some(reason),
            usage,
        }
    }
}

pub struct UsageGovernor {
    store: Arc<dyn SessionStore>,
    plans: PlanTable,
    clock: Arc<dyn Clock>,
}

impl UsageGovernor {
    pub fn new(store: Arc<dyn SessionStore>, plans: PlanTable, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            plans,
            clock,
        }
    }

    /// In-memory governor on the wall clock.
    pub fn in_memory(plans: PlanTable) -> Self {
        Self::new(Arc::new(MemoryStore::new()), plans, Arc::new(SystemClock))
    }

    pub fn plans(&self) -> &PlanTable {
        &self.plans
    }

    /// Create the session if it does not exist yet. An existing session keeps
    /// its plan and counters whatever `plan` says; only its activity time moves.
    pub fn create_session(&self, token: &str, plan: Plan) -> Session {
        let now = self.clock.now();
        let handle = self.store.insert_if_absent(Session::new(token, plan, now));
        let mut session = lock(&handle);
        if session.last_used_at < now {
            session.last_used_at = now;
        }
        tracing::debug!(session = %session.token, plan = %session.plan, "Session ready");
        session.clone()
    }

    pub fn get_session(&self, token: &str) -> Option<Session> {
        self.store.get(token).map(|h| lock(&h).clone())
    }

    pub fn all_sessions(&self) -> Vec<Session> {
        self.store
            .tokens()
            .iter()
            .filter_map(|t| self.get_session(t))
            .collect()
    }

    pub fn opt_in(&self, token: &str) -> bool {
        self.set_consent(token, true)
    }

    pub fn opt_out(&self, token: &str) -> bool {
        self.set_consent(token, false)
    }

    fn set_consent(&self, token: &str, opted_in: bool) -> bool {
        let Some(handle) = self.store.get(token) else {
            return false;
        };
        let mut session = lock(&handle);
        session.opted_in = opted_in;
        let limits = self.plans.limits(session.plan);
        session.refresh_ai_enabled(&limits);
        session.last_used_at = self.clock.now();
        tracing::debug!(session = %token, opted_in, "AI consent changed");
        true
    }

    /// Move a session to another tier and re-derive its AI flag.
    pub fn change_plan(&self, token: &str, plan: Plan) -> bool {
        let Some(handle) = self.store.get(token) else {
            return false;
        };
        let mut session = lock(&handle);
        session.plan = plan;
        session.refresh_ai_enabled(&self.plans.limits(plan));
        session.last_used_at = self.clock.now();
        true
    }

    /// Checks run in order: existence, consent, token ceiling, call ceiling.
    /// A ceiling hit also switches the session's AI flag off.
    pub fn can_use_ai(&self, token: &str) -> AiStatus {
        let Some(handle) = self.store.get(token) else {
            return AiStatus::denied(DenialReason::SessionNotFound, None);
        };
        let mut session = lock(&handle);
        let limits = self.plans.limits(session.plan);

        if !session.opted_in {
            return AiStatus::denied(DenialReason::NotOptedIn, Some(session.snapshot(&limits)));
        }

        if session.tokens_exhausted(&limits) {
            session.ai_enabled = false;
            return AiStatus::denied(
                DenialReason::TokenLimitExceeded {
                    limit: limits.max_tokens,
                },
                Some(session.snapshot(&limits)),
            );
        }

        if session.calls_exhausted(&limits) {
            session.ai_enabled = false;
            return AiStatus::denied(
                DenialReason::CallLimitExceeded {
                    limit: limits.max_calls,
                },
                Some(session.snapshot(&limits)),
            );
        }

        AiStatus::allowed(session.snapshot(&limits))
    }

    /// Add one call and `tokens` to the session. Disables AI as soon as either
    /// ceiling is reached.
    pub fn record_usage(&self, token: &str, tokens: u64) -> bool {
        let Some(handle) = self.store.get(token) else {
            return false;
        };
        let mut session = lock(&handle);
        let limits = self.plans.limits(session.plan);

        session.tokens_used = session.tokens_used.saturating_add(tokens);
        session.calls_used = session.calls_used.saturating_add(1);
        session.last_used_at = self.clock.now();

        if !session.within_limits(&limits) {
            session.ai_enabled = false;
            tracing::info!(
                session = %token,
                tokens_used = session.tokens_used,
                calls_used = session.calls_used,
                plan = %session.plan,
                "Plan ceiling reached, AI disabled"
            );
        }
        true
    }

    pub fn usage_snapshot(&self, token: &str) -> Option<UsageSnapshot> {
        let handle = self.store.get(token)?;
        let session = lock(&handle);
        Some(session.snapshot(&self.plans.limits(session.plan)))
    }

    /// Drop sessions idle for longer than `max_age_hours`. Returns how many
    /// were removed.
    pub fn sweep_expired(&self, max_age_hours: u64) -> usize {
        let hours = max_age_hours.min(MAX_SWEEP_AGE_HOURS) as i64;
        let now = self.clock.now();
        let Some(cutoff) = now.checked_sub_signed(Duration::hours(hours)) else {
            return 0;
        };
        let mut removed = 0;

        for token in self.store.tokens() {
            let Some(handle) = self.store.get(&token) else {
                continue;
            };
            // Holding the session lock keeps a concurrent touch from racing
            // the removal.
            let session = lock(&handle);
            if session.last_used_at < cutoff {
                self.store.remove(&token);
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(removed, max_age_hours, "Swept idle sessions");
        }
        removed
    }
}
