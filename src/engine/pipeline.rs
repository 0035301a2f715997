//! The end-to-end analysis pass.
//!
//! Everything except the remote classifier call is synchronous and pure.
//! Entries are analyzed independently and merged only at the end of each
//! batch, so no entry ever observes another's in-progress state.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{sleep, timeout};

use crate::analysis::rule_engine::detect_tags;
use crate::analysis::scoring::score_tags;
use crate::config::{BatchSettings, ProcessScore};
use crate::data::{SemanticClassifier, sanitize_remote_tags};
use crate::domain::{DetectedTag, JournalEntry, TagName};

pub struct AnalysisPipeline {
    classifier: Option<Arc<dyn SemanticClassifier>>,
    batching: BatchSettings,
}

impl AnalysisPipeline {
    /// Local rule engine only; no remote calls anywhere in the pass.
    pub fn rule_only() -> Self {
        Self {
            classifier: None,
            batching: BatchSettings::default(),
        }
    }

    /// Rule engine plus a remote semantic source, paced by `batching`.
    pub fn with_classifier(
        classifier: Arc<dyn SemanticClassifier>,
        batching: BatchSettings,
    ) -> Self {
        Self {
            classifier: Some(classifier),
            batching,
        }
    }

    /// Analyze one entry's text without touching any entry state.
    pub fn analyze_text(&self, content: &str) -> (Vec<DetectedTag>, ProcessScore) {
        let tags = detect_tags(content);
        let score = score_tags(&tags);
        (tags, score)
    }

    /// Rule-engine-only analysis of one entry, replacing its computed fields.
    pub fn analyze_entry(&self, entry: &mut JournalEntry) {
        let (tags, score) = self.analyze_text(&entry.content);
        entry.apply_analysis(tags, score);
    }

    /// Full-collection pass. With a classifier attached, calls within a
    /// batch run concurrently and batches run sequentially with a
    /// mandatory delay between them (the backend's rate limit belongs to
    /// the caller's configuration, not to us). A failed or slow call
    /// degrades that one entry to rule-engine tags; the pass always
    /// finishes.
    pub async fn analyze_all(&self, entries: &mut [JournalEntry]) {
        let Some(classifier) = &self.classifier else {
            for entry in entries.iter_mut() {
                self.analyze_entry(entry);
            }
            return;
        };

        let batch_size = self.batching.effective_batch_size();
        let total_batches = entries.len().div_ceil(batch_size);

        for (batch_idx, batch) in entries.chunks_mut(batch_size).enumerate() {
            let calls = batch
                .iter()
                .map(|entry| self.classify_guarded(Arc::clone(classifier), entry.content.clone()));
            let remote_sets = join_all(calls).await;

            for (entry, remote) in batch.iter_mut().zip(remote_sets) {
                let local = detect_tags(&entry.content);
                let merged = merge_tag_sources(remote, local);
                let score = score_tags(&merged);
                entry.apply_analysis(merged, score);
            }

            if batch_idx + 1 < total_batches {
                sleep(self.batching.batch_delay).await;
            }
        }
    }

    /// Boundary guard: errors, timeouts and junk all collapse to "no
    /// additional tags" here and never reach the caller.
    async fn classify_guarded(
        &self,
        classifier: Arc<dyn SemanticClassifier>,
        content: String,
    ) -> Vec<DetectedTag> {
        match timeout(self.batching.call_timeout, classifier.classify(&content)).await {
            Ok(Ok(remote)) => sanitize_remote_tags(remote),
            Ok(Err(err)) => {
                log::warn!("semantic classifier failed, keeping rule tags only: {err:#}");
                Vec::new()
            }
            Err(_) => {
                log::warn!(
                    "semantic classifier timed out after {:?}, keeping rule tags only",
                    self.batching.call_timeout
                );
                Vec::new()
            }
        }
    }
}

/// Two-source merge with explicit precedence: every remote tag survives,
/// and rule-engine tags fill in only the tag names the remote source did
/// not claim. Nothing is ever double-counted.
pub fn merge_tag_sources(remote: Vec<DetectedTag>, local: Vec<DetectedTag>) -> Vec<DetectedTag> {
    let claimed: HashSet<TagName> = remote.iter().map(|detected| detected.tag).collect();
    let mut merged = remote;
    merged.extend(local.into_iter().filter(|d| !claimed.contains(&d.tag)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::Confidence;
    use crate::data::RemoteTag;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn entry(id: &str, content: &str) -> JournalEntry {
        JournalEntry::new(
            id.to_string(),
            NaiveDate::from_ymd_opt(2025, 3, 21).unwrap(),
            content.to_string(),
        )
    }

    fn detected(tag: TagName, confidence: f64) -> DetectedTag {
        DetectedTag {
            tag,
            severity: catalog::severity(tag),
            confidence: Confidence::new(confidence),
            matched_phrases: Vec::new(),
            context: None,
        }
    }

    /// Always returns the same canned tags.
    struct StaticClassifier(Vec<RemoteTag>);

    #[async_trait]
    impl SemanticClassifier for StaticClassifier {
        async fn classify(&self, _text: &str) -> Result<Vec<RemoteTag>> {
            Ok(self.0.clone())
        }
    }

    /// Always errors, exercising the degradation path.
    struct FailingClassifier;

    #[async_trait]
    impl SemanticClassifier for FailingClassifier {
        async fn classify(&self, _text: &str) -> Result<Vec<RemoteTag>> {
            Err(anyhow!("backend unavailable"))
        }
    }

    /// Never returns within any reasonable deadline.
    struct HangingClassifier;

    #[async_trait]
    impl SemanticClassifier for HangingClassifier {
        async fn classify(&self, _text: &str) -> Result<Vec<RemoteTag>> {
            sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    fn fast_batching() -> BatchSettings {
        BatchSettings {
            batch_size: 2,
            batch_delay: Duration::from_millis(1),
            call_timeout: Duration::from_millis(50),
        }
    }

    #[test]
    fn remote_tags_win_per_name_locals_fill_gaps() {
        let remote = vec![detected(TagName::Overtrading, 0.95)];
        let local = vec![
            detected(TagName::Overtrading, 0.7),
            detected(TagName::PatienceConfirmation, 0.9),
        ];

        let merged = merge_tag_sources(remote, local);
        assert_eq!(merged.len(), 2);
        let overtrading = merged.iter().find(|d| d.tag == TagName::Overtrading).unwrap();
        assert_eq!(overtrading.confidence.value(), 0.95);
        assert!(merged.iter().any(|d| d.tag == TagName::PatienceConfirmation));
    }

    #[tokio::test]
    async fn rule_only_pass_fills_tags_and_scores() {
        let pipeline = AnalysisPipeline::rule_only();
        let mut entries = vec![
            entry("a", "chased a few setups but took SL every time"),
            entry("b", "nothing notable happened"),
        ];

        pipeline.analyze_all(&mut entries).await;

        assert_eq!(entries[0].process_score.unwrap().value(), 47);
        assert_eq!(entries[1].detected_tags.len(), 0);
        assert_eq!(entries[1].process_score.unwrap().value(), 50);
    }

    #[tokio::test]
    async fn classifier_tags_take_precedence_over_rule_hits() {
        // Rule engine finds chasing (1.0); the remote source claims the
        // same tag name at lower confidence and wins anyway.
        let classifier = Arc::new(StaticClassifier(vec![RemoteTag {
            tag: "chasing_early_entry".to_string(),
            severity: None,
            confidence: 0.6,
            reasoning: Some("semantic match".to_string()),
        }]));
        let pipeline = AnalysisPipeline::with_classifier(classifier, fast_batching());

        let mut entries = vec![entry("a", "chased the open again")];
        pipeline.analyze_all(&mut entries).await;

        assert_eq!(entries[0].detected_tags.len(), 1);
        let tag = &entries[0].detected_tags[0];
        assert_eq!(tag.tag, TagName::ChasingEarlyEntry);
        assert_eq!(tag.confidence.value(), 0.6);
        assert_eq!(tag.context.as_deref(), Some("semantic match"));
    }

    #[tokio::test]
    async fn failed_classifier_degrades_to_rule_tags() {
        let pipeline =
            AnalysisPipeline::with_classifier(Arc::new(FailingClassifier), fast_batching());
        let mut entries = vec![entry("a", "took SL at the level like planned")];

        pipeline.analyze_all(&mut entries).await;

        assert_eq!(entries[0].detected_tags.len(), 1);
        assert_eq!(entries[0].detected_tags[0].tag, TagName::HardStopRespected);
    }

    #[tokio::test]
    async fn hanging_classifier_times_out_instead_of_stalling() {
        let pipeline =
            AnalysisPipeline::with_classifier(Arc::new(HangingClassifier), fast_batching());
        let mut entries = vec![
            entry("a", "overtraded the chop"),
            entry("b", "waited for close and got paid"),
            entry("c", "hesitated at the retest"),
        ];

        pipeline.analyze_all(&mut entries).await;

        // All three entries finished with rule-engine tags despite the
        // hung backend (two batches of 2 + 1).
        assert!(entries.iter().all(|e| e.process_score.is_some()));
        assert_eq!(entries[0].detected_tags[0].tag, TagName::Overtrading);
        assert_eq!(entries[1].detected_tags[0].tag, TagName::PatienceConfirmation);
        assert_eq!(entries[2].detected_tags[0].tag, TagName::HesitationMissedEntry);
    }

    #[tokio::test]
    async fn parse_then_analyze_end_to_end() {
        use crate::analysis::parser::parse_journal_as_of;

        let raw = "Trading Journal - March 21, 2025\nOverall Conviction: Bullish\nEntry: retest of key level\nLessons Learned:\n1. waited for close before entering";
        let parsed = parse_journal_as_of(raw, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
        assert!(parsed[0].conviction.as_deref().unwrap().contains("Bullish"));

        let pipeline = AnalysisPipeline::rule_only();
        let mut e = JournalEntry::from_parsed(&parsed[0]);
        pipeline.analyze_entry(&mut e);

        let patience = e
            .detected_tags
            .iter()
            .find(|d| d.tag == TagName::PatienceConfirmation)
            .expect("patience detected");
        assert_eq!(patience.confidence.value(), 0.9);
        assert!(patience.matched_phrases.contains(&"waited for close".to_string()));
        assert!(e.process_score.is_some());
    }

    #[tokio::test]
    async fn reanalysis_replaces_previous_results() {
        let pipeline = AnalysisPipeline::rule_only();
        let mut e = entry("a", "chased the move");
        e.detected_tags = vec![detected(TagName::BiasLock, 0.9)];
        e.process_score = Some(ProcessScore::new(10));

        pipeline.analyze_entry(&mut e);

        assert_eq!(e.detected_tags.len(), 1);
        assert_eq!(e.detected_tags[0].tag, TagName::ChasingEarlyEntry);
        assert_eq!(e.process_score.unwrap().value(), 42);
    }
}
