//! Value newtypes shared across the analysis pipeline (Immutable Blueprints)

use serde::{Deserialize, Serialize};

/// Detection confidence, clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Below or at this value a detection is considered too weak to emit.
    pub const EMIT_THRESHOLD: f64 = 0.5;

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True if this confidence clears the fixed emission threshold.
    /// Strictly greater-than: 0.5 exactly does NOT emit.
    pub fn is_actionable(self) -> bool {
        self.0 > Self::EMIT_THRESHOLD
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// A 0-100 process-discipline score. Always recomputable from an entry's
/// detected tags, so never authoritative on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessScore(u8);

impl ProcessScore {
    /// Score of an entry with no detected tags at all.
    pub const NEUTRAL: Self = Self(50);

    pub const fn new(val: u8) -> Self {
        let v = if val > 100 { 100 } else { val };
        Self(v)
    }

    /// Clamp to [0, 100] and round to the nearest integer.
    pub fn from_raw(val: f64) -> Self {
        let clamped = val.clamp(0.0, 100.0);
        Self(clamped.round() as u8)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ProcessScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl std::fmt::Display for ProcessScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/100", self.0)
    }
}
