// src/api/types.rs

use crate::coach::CoachingResponse;
use crate::core::ScenarioOutcome;
use crate::usage::UsageSnapshot;
use serde::{Deserialize, Serialize};

/// Request body for a scenario suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub scenario: String,
}

/// Response for a scenario suggestion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestResponse {
    pub scenario: String,
    #[serde(rename = "ai_analysis")]
    pub ai_analysis: String,
    #[serde(rename = "usedAI")]
    pub used_ai: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    pub usage: Option<UsageSnapshot>,
    pub ai_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coaching: Option<CoachingResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_message: Option<String>,
}

impl SuggestResponse {
    pub fn from_outcome(scenario: String, outcome: ScenarioOutcome) -> Self {
        Self {
            scenario,
            ai_analysis: outcome.analysis,
            used_ai: outcome.used_ai,
            provider: outcome.provider,
            estimated_cost: outcome.estimated_cost,
            usage: outcome.usage,
            ai_status: outcome.ai_status,
            coaching: outcome.coaching,
            upgrade_message: outcome.upgrade_message,
        }
    }
}

/// Response for opt-in / opt-out.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub message: String,
    pub usage: Option<UsageSnapshot>,
}

/// Usage status response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub usage: Option<UsageSnapshot>,
    pub ai_status: String,
    #[serde(rename = "canUseAI")]
    pub can_use_ai: bool,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tips: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
