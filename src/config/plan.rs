//! Daily plan policy (Immutable Blueprints)
//!
//! The thresholds below are domain policy, not tunable parameters. They
//! were set from live trading review sessions; changing one changes what
//! the plan tells the trader to do the next morning.

/// Baseline guardrails that appear on every generated plan.
#[derive(Clone, Debug)]
pub struct PlanBaseline {
    pub risk_cap: &'static str,
    pub max_stop: &'static str,
    pub sizing_ladder: &'static str,
}

/// How many recent entries the plan generator looks back over.
#[derive(Clone, Debug)]
pub struct PlanWindow {
    pub max_entries: usize,
}

/// Weakness-count thresholds that switch on the conditional guardrails.
/// Counts are unweighted occurrences within the lookback window.
#[derive(Clone, Debug)]
pub struct PlanThresholds {
    pub premature_breakeven: usize,
    pub chasing_early_entry: usize,
    pub data_candle_violation: usize,
    pub hesitation_missed_entry: usize,
    pub overtrading: usize,
    pub sizing_drift: usize,
    pub bias_lock: usize,
}

/// The Master Plan Policy
#[derive(Clone, Debug)]
pub struct PlanPolicy {
    pub baseline: PlanBaseline,
    pub window: PlanWindow,
    pub thresholds: PlanThresholds,
}

pub const PLAN_POLICY: PlanPolicy = PlanPolicy {
    baseline: PlanBaseline {
        risk_cap: "$250-$500",
        max_stop: "15 points",
        sizing_ladder: "1 NQ, scale to 3 MNQ",
    },

    window: PlanWindow { max_entries: 10 },

    thresholds: PlanThresholds {
        premature_breakeven: 3,
        chasing_early_entry: 2,
        data_candle_violation: 1,
        hesitation_missed_entry: 3,
        overtrading: 2,
        sizing_drift: 1,
        bias_lock: 2,
    },
};
