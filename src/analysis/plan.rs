//! Rule-based daily plan generation.
//!
//! The plan inspects weakness frequency over the most recent entries and
//! switches guardrails on when a pattern repeats often enough to be
//! policy, not noise. Counts here are unweighted: three low-grade lapses
//! gate the same guardrail as three bad ones.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::PLAN_POLICY;
use crate::domain::{DailyPlan, JournalEntry, TagName};

/// Derive the next session's guardrails from entries dated on or before
/// `as_of`, newest first, capped at the policy window.
pub fn generate_plan(entries: &[JournalEntry], as_of: NaiveDate) -> DailyPlan {
    let mut window: Vec<&JournalEntry> =
        entries.iter().filter(|entry| entry.date <= as_of).collect();
    window.sort_by(|a, b| b.date.cmp(&a.date));
    window.truncate(PLAN_POLICY.window.max_entries);

    let mut counts: HashMap<TagName, usize> = HashMap::new();
    for entry in &window {
        for detected in &entry.detected_tags {
            if detected.tag.is_weakness() {
                *counts.entry(detected.tag).or_insert(0) += 1;
            }
        }
    }
    let count = |tag: TagName| counts.get(&tag).copied().unwrap_or(0);

    let baseline = &PLAN_POLICY.baseline;
    let mut plan = DailyPlan {
        risk_cap: baseline.risk_cap.to_string(),
        max_stop: baseline.max_stop.to_string(),
        sizing_ladder: baseline.sizing_ladder.to_string(),
        chop_filter: true,
        be_after_structure: false,
        retest_only: false,
        no_first_5_min: false,
        no_data_candle: false,
        two_strike_rule: false,
        bias_flip_protocol: false,
        reminders: Vec::new(),
    };

    let thresholds = &PLAN_POLICY.thresholds;

    if count(TagName::PrematureBreakeven) >= thresholds.premature_breakeven {
        plan.be_after_structure = true;
        plan.reminders.push(
            "Breakeven waits for structure: the first pullback has to hold before the stop moves."
                .to_string(),
        );
    }

    if count(TagName::ChasingEarlyEntry) >= thresholds.chasing_early_entry {
        plan.retest_only = true;
        plan.reminders
            .push("Retest entries only. If the level is gone, the trade is gone.".to_string());
    }

    if count(TagName::DataCandleViolation) >= thresholds.data_candle_violation {
        plan.no_first_5_min = true;
        plan.no_data_candle = true;
        plan.reminders.push(
            "No entries in the first 5 minutes and never inside a data candle.".to_string(),
        );
    }

    if count(TagName::HesitationMissedEntry) >= thresholds.hesitation_missed_entry {
        plan.reminders.push(
            "A planned setup at a planned level gets taken. Hesitation is also a decision."
                .to_string(),
        );
    }

    if count(TagName::Overtrading) >= thresholds.overtrading {
        plan.two_strike_rule = true;
        plan.reminders
            .push("Two strikes and the platform closes for the day.".to_string());
    }

    if count(TagName::SizingDrift) >= thresholds.sizing_drift {
        plan.reminders
            .push("Stay on the sizing ladder. Size up only when the ladder says so.".to_string());
    }

    if count(TagName::BiasLock) >= thresholds.bias_lock {
        plan.bias_flip_protocol = true;
        plan.reminders.push(
            "Two failed attempts in one direction forces a bias review before the next trade."
                .to_string(),
        );
    }

    plan
}
