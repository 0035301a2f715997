use serde::{Deserialize, Serialize};

/// Rule-derived guardrails for the next session. Derived from a rolling
/// window of recent entries; safe to discard and regenerate at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub risk_cap: String,
    pub max_stop: String,
    pub sizing_ladder: String,

    /// Always on: stand aside while price chops inside the opening balance.
    pub chop_filter: bool,

    // Conditional guardrails, switched on by recent weakness frequency
    pub be_after_structure: bool,
    pub retest_only: bool,
    pub no_first_5_min: bool,
    pub no_data_candle: bool,
    pub two_strike_rule: bool,
    pub bias_flip_protocol: bool,

    pub reminders: Vec<String>,
}
