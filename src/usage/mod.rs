// src/usage/mod.rs — Session quota governance

pub mod governor;
pub mod plan;
pub mod session;
pub mod store;

pub use governor::{AiStatus, DenialReason, UsageGovernor};
pub use plan::{Plan, PlanLimits, PlanTable};
pub use session::{
    Clock, RandomTokenGenerator, Session, SystemClock, TokenGenerator, UsageSnapshot,
};
pub use store::{MemoryStore, SessionHandle, SessionStore};
