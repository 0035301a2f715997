//! Configuration module for the journal analysis pipeline.

mod classify;
mod plan;
mod types;

// Re-export commonly used items
pub use classify::BatchSettings;
pub use plan::{PLAN_POLICY, PlanBaseline, PlanPolicy, PlanThresholds, PlanWindow};
pub use types::{Confidence, ProcessScore};
