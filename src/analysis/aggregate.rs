//! Cross-entry tag aggregation.

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::domain::{JournalEntry, TagFamily, TagName};

/// One tag's share of its family across the aggregated entries.
#[derive(Debug, Clone, PartialEq)]
pub struct TagShare {
    pub tag: TagName,
    pub percentage: f64,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Strength tags with at least one occurrence, descending by share.
    pub strengths: Vec<TagShare>,
    /// Weakness tags with at least one occurrence, descending by share.
    pub weaknesses: Vec<TagShare>,
    /// Mean process score over entries that carry one; 0.0 when none do.
    pub mean_score: f64,
}

/// Fold every entry's detected tags into severity-weighted frequency
/// distributions, one per family. Counters are zero-initialized across
/// the entire catalog so a tag with zero occurrences is representable.
pub fn aggregate(entries: &[JournalEntry]) -> AggregateReport {
    let mut counters: Vec<(TagName, f64, usize)> =
        TagName::iter().map(|tag| (tag, 0.0, 0)).collect();

    for entry in entries {
        for detected in &entry.detected_tags {
            if let Some((_, weight, count)) =
                counters.iter_mut().find(|(tag, _, _)| *tag == detected.tag)
            {
                *weight += detected.severity.distribution_weight();
                *count += 1;
            }
        }
    }

    let scores: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.process_score)
        .map(|score| f64::from(score.value()))
        .collect();
    let mean_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    AggregateReport {
        strengths: family_shares(&counters, TagFamily::Strength),
        weaknesses: family_shares(&counters, TagFamily::Weakness),
        mean_score,
    }
}

fn family_shares(counters: &[(TagName, f64, usize)], family: TagFamily) -> Vec<TagShare> {
    let total: f64 = counters
        .iter()
        .filter(|(tag, _, _)| tag.family() == family)
        .map(|(_, weight, _)| weight)
        .sum();

    counters
        .iter()
        .filter(|(tag, _, count)| tag.family() == family && *count > 0)
        .map(|&(tag, weight, count)| TagShare {
            tag,
            // Guarded: a family with occurrences always has weight > 0,
            // but the zero-division default keeps this total.
            percentage: if total > 0.0 {
                weight / total * 100.0
            } else {
                0.0
            },
            count,
        })
        .sorted_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::{Confidence, ProcessScore};
    use crate::domain::DetectedTag;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn entry_on(day: u32, tags: &[TagName], score: Option<u8>) -> JournalEntry {
        let mut entry = JournalEntry::new(
            format!("entry-{day}"),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            "content".to_string(),
        );
        entry.detected_tags = tags
            .iter()
            .map(|&tag| DetectedTag {
                tag,
                severity: catalog::severity(tag),
                confidence: Confidence::new(0.9),
                matched_phrases: Vec::new(),
                context: None,
            })
            .collect();
        entry.process_score = score.map(ProcessScore::new);
        entry
    }

    #[test]
    fn empty_entries_produce_empty_report() {
        let report = aggregate(&[]);
        assert!(report.strengths.is_empty());
        assert!(report.weaknesses.is_empty());
        assert_eq!(report.mean_score, 0.0);
    }

    #[test]
    fn untagged_entries_produce_empty_distributions() {
        let entries = vec![entry_on(1, &[], None), entry_on(2, &[], None)];
        let report = aggregate(&entries);
        assert!(report.strengths.is_empty());
        assert!(report.weaknesses.is_empty());
        assert_eq!(report.mean_score, 0.0);
    }

    #[test]
    fn percentages_per_family_sum_to_100() {
        let entries = vec![
            entry_on(1, &[TagName::PatienceConfirmation, TagName::Overtrading], Some(47)),
            entry_on(2, &[TagName::LevelThesis, TagName::Overtrading], Some(50)),
            entry_on(3, &[TagName::PatienceConfirmation, TagName::SizingDrift], Some(55)),
        ];
        let report = aggregate(&entries);

        let strength_sum: f64 = report.strengths.iter().map(|s| s.percentage).sum();
        let weakness_sum: f64 = report.weaknesses.iter().map(|s| s.percentage).sum();
        assert!((strength_sum - 100.0).abs() < 1e-9);
        assert!((weakness_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn families_are_weighted_by_severity_and_sorted_descending() {
        // Overtrading (high, weight 3) twice = 6; SizingDrift (med, 2) once = 2.
        let entries = vec![
            entry_on(1, &[TagName::Overtrading], None),
            entry_on(2, &[TagName::Overtrading, TagName::SizingDrift], None),
        ];
        let report = aggregate(&entries);

        assert_eq!(report.weaknesses.len(), 2);
        assert_eq!(report.weaknesses[0].tag, TagName::Overtrading);
        assert_eq!(report.weaknesses[0].count, 2);
        assert!((report.weaknesses[0].percentage - 75.0).abs() < 1e-9);
        assert_eq!(report.weaknesses[1].tag, TagName::SizingDrift);
        assert!((report.weaknesses[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn mean_skips_entries_without_scores() {
        let entries = vec![
            entry_on(1, &[], Some(40)),
            entry_on(2, &[], Some(60)),
            entry_on(3, &[], None),
        ];
        assert_eq!(aggregate(&entries).mean_score, 50.0);
    }
}
