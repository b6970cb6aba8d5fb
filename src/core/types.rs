// src/core/types.rs — Results handed back to the request layer

use crate::coach::CoachingResponse;
use crate::usage::{AiStatus, UsageSnapshot};

/// Shown as the AI status when nothing blocks AI use.
pub const AI_AVAILABLE: &str = "Available";

/// Result of one scenario analysis.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Token the caller must reuse on later calls.
    pub session_token: String,
    /// Never empty.
    pub analysis: String,
    pub used_ai: bool,
    /// Provider that produced the analysis when `used_ai`.
    pub provider: Option<String>,
    /// Estimated USD spend of the AI call.
    pub estimated_cost: Option<f64>,
    /// Denial reason, or "Available".
    pub ai_status: String,
    /// Full coaching response when the fallback coach answered.
    pub coaching: Option<CoachingResponse>,
    /// Upsell text when a plan ceiling blocked AI.
    pub upgrade_message: Option<String>,
    pub usage: Option<UsageSnapshot>,
}

/// Result of an opt-in or opt-out request.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub session_token: String,
    pub success: bool,
    pub usage: Option<UsageSnapshot>,
}

/// Current quota position of a session.
#[derive(Debug, Clone)]
pub struct UsageStatus {
    pub session_token: String,
    pub can_use_ai: bool,
    pub ai_status: String,
    pub usage: Option<UsageSnapshot>,
}

pub(crate) fn status_text(status: &AiStatus) -> String {
    status
        .reason
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| AI_AVAILABLE.to_string())
}
