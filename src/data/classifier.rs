use std::collections::HashSet;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::config::Confidence;
use crate::domain::{DetectedTag, Severity, TagName};

/// Abstract interface to a remote semantic classification backend.
///
/// The backend sees raw entry text only: no entry ids, no history. It may
/// fail, time out, or return junk; the pipeline treats all of those as
/// "no additional tags" and never lets them escape the boundary.
#[async_trait]
pub trait SemanticClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<RemoteTag>>;
}

/// Wire shape of one candidate tag as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTag {
    pub tag: String,
    /// Advisory only: the catalog's tag->severity mapping is fixed and
    /// total, so whatever the backend claims is replaced on intake.
    #[serde(default)]
    pub severity: Option<Severity>,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Validate remote candidates against the fixed catalog. Unrecognized
/// tag names are silently dropped (logged, not errored), duplicates keep
/// their first occurrence, confidence is clamped, and severity comes
/// from the catalog.
pub fn sanitize_remote_tags(remote: Vec<RemoteTag>) -> Vec<DetectedTag> {
    let mut seen: HashSet<TagName> = HashSet::new();
    let mut accepted = Vec::new();

    for candidate in remote {
        let Ok(tag) = TagName::from_str(candidate.tag.trim()) else {
            log::debug!("dropping unrecognized classifier tag '{}'", candidate.tag);
            continue;
        };
        if !seen.insert(tag) {
            continue;
        }
        accepted.push(DetectedTag {
            tag,
            severity: catalog::severity(tag),
            confidence: Confidence::new(candidate.confidence),
            matched_phrases: Vec::new(),
            context: candidate.reasoning,
        });
    }

    accepted
}
