use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::Confidence;

/// The fixed behavioral vocabulary. Strength and weakness names are
/// disjoint; membership is decided here via `family()`, never by a flag
/// stored alongside a detection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TagName {
    // Strengths
    PatienceConfirmation,
    LevelThesis,
    HardStopRespected,
    BaseHitScalping,
    ResetComposure,
    ReflectionLearning,
    MnqScaling,

    // Weaknesses
    PrematureBreakeven,
    TightTrailing,
    ChasingEarlyEntry,
    BiasLock,
    SizingDrift,
    DataCandleViolation,
    HesitationMissedEntry,
    Overtrading,
    ProcessError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TagFamily {
    Strength,
    Weakness,
}

impl TagName {
    pub fn family(&self) -> TagFamily {
        match self {
            Self::PatienceConfirmation
            | Self::LevelThesis
            | Self::HardStopRespected
            | Self::BaseHitScalping
            | Self::ResetComposure
            | Self::ReflectionLearning
            | Self::MnqScaling => TagFamily::Strength,

            Self::PrematureBreakeven
            | Self::TightTrailing
            | Self::ChasingEarlyEntry
            | Self::BiasLock
            | Self::SizingDrift
            | Self::DataCandleViolation
            | Self::HesitationMissedEntry
            | Self::Overtrading
            | Self::ProcessError => TagFamily::Weakness,
        }
    }

    pub fn is_strength(&self) -> bool {
        self.family() == TagFamily::Strength
    }

    pub fn is_weakness(&self) -> bool {
        self.family() == TagFamily::Weakness
    }
}

/// Fixed per-tag severity. Not entry-dependent: a tag is always detected
/// at the severity the catalog declares for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Med,
    High,
}

impl Severity {
    /// How much a detected strength adds to the process score (scaled by confidence).
    pub fn reward_weight(&self) -> f64 {
        match self {
            Self::High => 5.0,
            Self::Med => 3.0,
            Self::Low => 2.0,
        }
    }

    /// How much a detected weakness subtracts from the process score.
    /// Heavier than the reward side: losing discipline costs more than
    /// keeping it earns.
    pub fn penalty_weight(&self) -> f64 {
        match self {
            Self::High => 8.0,
            Self::Med => 5.0,
            Self::Low => 3.0,
        }
    }

    /// Weight used when aggregating tag frequency across entries.
    pub fn distribution_weight(&self) -> f64 {
        match self {
            Self::High => 3.0,
            Self::Med => 2.0,
            Self::Low => 1.0,
        }
    }
}

/// One behavioral pattern detected in one entry's text. At most one per
/// (entry, tag name) pair; `confidence` is the maximum over all trigger
/// groups that matched, never a sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedTag {
    pub tag: TagName,
    pub severity: Severity,
    pub confidence: Confidence,
    pub matched_phrases: Vec<String>,
    pub context: Option<String>,
}
