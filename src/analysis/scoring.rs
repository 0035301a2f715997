//! Process score calculation.
//!
//! Weaknesses are weighted heavier than strengths: one lapse of
//! discipline costs more than one good habit earns back.

use crate::config::ProcessScore;
use crate::domain::{DetectedTag, TagFamily};

/// Score an entry's detected tag set. Pure: same tags in, same score
/// out, any number of times. No tags at all scores the neutral baseline.
pub fn score_tags(tags: &[DetectedTag]) -> ProcessScore {
    let mut raw = f64::from(ProcessScore::NEUTRAL.value());

    for detected in tags {
        let confidence = detected.confidence.value();
        match detected.tag.family() {
            TagFamily::Strength => raw += confidence * detected.severity.reward_weight(),
            TagFamily::Weakness => raw -= confidence * detected.severity.penalty_weight(),
        }
    }

    ProcessScore::from_raw(raw)
}
