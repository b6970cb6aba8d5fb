// src/usage/plan.rs — Plan tiers and their usage ceilings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::infra::errors::LucidraError;

/// Subscription tier attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Basic,
    Premium,
}

impl Plan {
    /// All tiers, tightest first.
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Basic, Plan::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::Premium => "premium",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = LucidraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(LucidraError::UnknownPlan(other.to_string())),
        }
    }
}

/// Token and call ceilings for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub max_tokens: u64,
    pub max_calls: u64,
}

impl PlanLimits {
    pub const fn new(max_tokens: u64, max_calls: u64) -> Self {
        Self {
            max_tokens,
            max_calls,
        }
    }

    fn strictly_below(&self, other: &PlanLimits) -> bool {
        self.max_tokens < other.max_tokens && self.max_calls < other.max_calls
    }
}

/// Ceilings for every tier. Loaded from `[plans]` in config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTable {
    #[serde(default = "default_free")]
    pub free: PlanLimits,
    #[serde(default = "default_basic")]
    pub basic: PlanLimits,
    #[serde(default = "default_premium")]
    pub premium: PlanLimits,
}

fn default_free() -> PlanLimits {
    PlanLimits::new(1_000, 5)
}

fn default_basic() -> PlanLimits {
    PlanLimits::new(10_000, 50)
}

fn default_premium() -> PlanLimits {
    PlanLimits::new(100_000, 500)
}

impl Default for PlanTable {
    fn default() -> Self {
        Self {
            free: default_free(),
            basic: default_basic(),
            premium: default_premium(),
        }
    }
}

impl PlanTable {
    pub fn limits(&self, plan: Plan) -> PlanLimits {
        match plan {
            Plan::Free => self.free,
            Plan::Basic => self.basic,
            Plan::Premium => self.premium,
        }
    }

    /// Every tier must be strictly tighter than the next one up, on both
    /// ceilings, and no ceiling may be zero.
    pub fn validate(&self) -> Result<(), LucidraError> {
        for plan in Plan::ALL {
            let limits = self.limits(plan);
            if limits.max_tokens == 0 || limits.max_calls == 0 {
                return Err(LucidraError::InvalidPlanTable(format!(
                    "plan '{plan}' has a zero ceiling"
                )));
            }
        }
        for pair in Plan::ALL.windows(2) {
            let (tight, loose) = (pair[0], pair[1]);
            if !self.limits(tight).strictly_below(&self.limits(loose)) {
                return Err(LucidraError::InvalidPlanTable(format!(
                    "plan '{tight}' must have strictly lower ceilings than '{loose}'"
                )));
            }
        }
        Ok(())
    }
}
