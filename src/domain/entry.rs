use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ProcessScore;
use crate::domain::DetectedTag;

/// The setup block a trader writes under "Setup:" with entry method,
/// size, risk and exit each on its own labeled line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupDetails {
    pub entry_method: Option<String>,
    pub position_size: Option<String>,
    pub risk: Option<String>,
    pub exit_method: Option<String>,
}

impl SetupDetails {
    pub fn is_empty(&self) -> bool {
        self.entry_method.is_none()
            && self.position_size.is_none()
            && self.risk.is_none()
            && self.exit_method.is_none()
    }
}

/// Best-effort structure pulled out of one raw journal block.
/// Every field except `date` and `raw_content` may be absent; absence is
/// normal, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub date: NaiveDate,
    pub conviction: Option<String>,
    pub setup: SetupDetails,
    pub lessons: Vec<String>,
    /// Session name ("morning", "afternoon", "night") -> that session's text.
    pub sessions: Vec<(String, String)>,
    pub trade_management: Option<String>,
    pub missed_opportunities: Option<String>,
    pub final_thoughts: Option<String>,
    /// The original block, trimmed, verbatim. Survives regardless of how
    /// little structure was extracted.
    pub raw_content: String,
}

impl ParsedEntry {
    pub fn session(&self, name: &str) -> Option<&str> {
        self.sessions
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, text)| text.as_str())
    }
}

/// An append-only journal record. `content` is immutable once created;
/// `detected_tags` and `process_score` are the only mutable fields and
/// change only when analysis is re-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub trade_ids: Vec<String>,
    #[serde(default)]
    pub detected_tags: Vec<DetectedTag>,
    #[serde(default)]
    pub process_score: Option<ProcessScore>,
}

impl JournalEntry {
    pub fn new(id: String, date: NaiveDate, content: String) -> Self {
        Self {
            id,
            date,
            content,
            trade_ids: Vec::new(),
            detected_tags: Vec::new(),
            process_score: None,
        }
    }

    /// Promote a parsed block into a journal record with a generated id.
    pub fn from_parsed(parsed: &ParsedEntry) -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            parsed.date,
            parsed.raw_content.clone(),
        )
    }

    /// Replace the computed analysis fields. Called by the pipeline only.
    pub fn apply_analysis(&mut self, tags: Vec<DetectedTag>, score: ProcessScore) {
        self.detected_tags = tags;
        self.process_score = Some(score);
    }
}
