// src/core/mod.rs — Scenario analysis service

pub mod service;
pub mod types;

pub use service::{estimate_tokens, ScenarioService};
pub use types::{ScenarioOutcome, ToggleOutcome, UsageStatus, AI_AVAILABLE};
