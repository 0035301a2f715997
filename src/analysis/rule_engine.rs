//! Keyword-trigger behavioral tag detection.
//!
//! Matching is plain substring containment over the lowercased entry
//! text. Trigger phrases are multi-word and punctuation-sensitive, which
//! makes containment both sufficient and fast; the occasional match
//! inside a longer unrelated word is an accepted cost of the approach.

use itertools::Itertools;

use crate::catalog::TAG_CATALOG;
use crate::config::Confidence;
use crate::domain::DetectedTag;

/// Scan entry text against the whole catalog. A tag is emitted only when
/// its best matching trigger group clears the fixed confidence threshold;
/// a tag that never clears it is simply absent, not a zero-confidence
/// record.
pub fn detect_tags(content: &str) -> Vec<DetectedTag> {
    let lowered = content.to_lowercase();
    let mut detected = Vec::new();

    for spec in TAG_CATALOG {
        let mut best = 0.0_f64;
        let mut matched: Vec<&str> = Vec::new();

        for group in spec.triggers {
            let hits = group
                .phrases
                .iter()
                .copied()
                .filter(|phrase| lowered.contains(phrase))
                .collect_vec();

            if !hits.is_empty() {
                // Maximum over matching groups, never a sum. Summing
                // would change which tags cross the emission threshold.
                best = best.max(group.confidence);
                matched.extend(hits);
            }
        }

        let confidence = Confidence::new(best);
        if confidence.is_actionable() {
            detected.push(DetectedTag {
                tag: spec.tag,
                severity: spec.severity,
                confidence,
                matched_phrases: matched.into_iter().unique().map(str::to_string).collect(),
                context: None,
            });
        }
    }

    detected
}
