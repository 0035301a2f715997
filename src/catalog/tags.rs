//! The fixed behavioral tag catalog.
//!
//! One table drives everything: severity, trigger groups and (via the tag
//! name itself) family membership. Adding a tag means adding one entry
//! here and one variant to `TagName`, with nothing else to keep in sync.
//!
//! Trigger phrases are matched by plain substring containment against the
//! lowercased entry text. They are multi-word and punctuation-sensitive on
//! purpose; a phrase matching inside a longer unrelated word (e.g.
//! "purchased" containing "chased") is an accepted false-positive cost of
//! this matching strategy.

use crate::domain::{Severity, TagName};

/// A set of phrases sharing one confidence value. A tag's detection
/// confidence is the maximum over its matching groups, not a sum.
#[derive(Debug)]
pub struct TriggerGroup {
    pub confidence: f64,
    pub phrases: &'static [&'static str],
}

#[derive(Debug)]
pub struct TagSpec {
    pub tag: TagName,
    pub severity: Severity,
    pub triggers: &'static [TriggerGroup],
}

pub const TAG_CATALOG: &[TagSpec] = &[
    // --- Strengths ---
    TagSpec {
        tag: TagName::PatienceConfirmation,
        severity: Severity::High,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &[
                    "waited for close",
                    "waited for the close",
                    "waited for confirmation",
                    "waited for candle close",
                ],
            },
            TriggerGroup {
                confidence: 0.8,
                phrases: &[
                    "let it come to me",
                    "let the level come",
                    "patience paid off",
                ],
            },
            TriggerGroup {
                confidence: 0.6,
                phrases: &["didn't chase", "did not chase", "no fomo"],
            },
        ],
    },
    TagSpec {
        tag: TagName::LevelThesis,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.75,
                phrases: &[
                    "level thesis",
                    "marked my levels",
                    "premarket levels",
                    "key level held",
                ],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &["key level", "support held", "resistance held"],
            },
        ],
    },
    TagSpec {
        tag: TagName::HardStopRespected,
        severity: Severity::High,
        triggers: &[
            TriggerGroup {
                confidence: 1.0,
                phrases: &[
                    "took sl",
                    "took the sl",
                    "took my stop",
                    "respected my stop",
                    "honored my stop",
                ],
            },
            TriggerGroup {
                confidence: 0.85,
                phrases: &[
                    "hard stop held",
                    "stopped out flat and moved on",
                    "let the stop work",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::BaseHitScalping,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.8,
                phrases: &["base hit", "base hits", "quick scalp", "scalped the move"],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "singles not home runs",
                    "took the single",
                    "small green is still green",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::ResetComposure,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.8,
                phrases: &[
                    "stepped away",
                    "walked away from the screen",
                    "took a break to reset",
                ],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "reset my head",
                    "regained composure",
                    "calmed down before the next trade",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::ReflectionLearning,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "lessons learned",
                    "lesson learned",
                    "reviewed my trades",
                    "went back over the tape",
                ],
            },
            TriggerGroup {
                confidence: 0.6,
                phrases: &["what i did wrong", "need to work on", "main takeaway"],
            },
        ],
    },
    TagSpec {
        tag: TagName::MnqScaling,
        severity: Severity::Low,
        triggers: &[
            TriggerGroup {
                confidence: 0.8,
                phrases: &[
                    "scaled down to mnq",
                    "switched to mnq",
                    "sized down to mnq",
                    "mnq scaling",
                ],
            },
            TriggerGroup {
                confidence: 0.6,
                phrases: &["added an mnq", "mnq runner"],
            },
        ],
    },
    // --- Weaknesses ---
    TagSpec {
        tag: TagName::PrematureBreakeven,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &[
                    "breakeven too early",
                    "moved to be too fast",
                    "rushed my stop to breakeven",
                    "moved my stop to breakeven right away",
                ],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "be stop took me out",
                    "stopped at breakeven then it ran",
                    "breakeven and watched it go",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::TightTrailing,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &["trailed too tight", "trailing too tight", "tight trail"],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "choked the trade",
                    "stop too close to price",
                    "wicked out by a point",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::ChasingEarlyEntry,
        severity: Severity::High,
        triggers: &[
            TriggerGroup {
                confidence: 1.0,
                phrases: &["chased", "chasing", "fomo'd in"],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "entered early",
                    "early entry",
                    "jumped in before confirmation",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::BiasLock,
        severity: Severity::High,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &[
                    "married to my bias",
                    "stuck in my bias",
                    "refused to flip",
                    "bias lock",
                ],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "kept shorting the rip",
                    "kept longing the dip",
                    "fought the trend all day",
                    "fighting the trend",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::SizingDrift,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &["oversized", "too much size", "size crept up", "sizing drift"],
            },
            TriggerGroup {
                confidence: 0.8,
                phrases: &["doubled my size", "went full size too early"],
            },
        ],
    },
    TagSpec {
        tag: TagName::DataCandleViolation,
        severity: Severity::High,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &[
                    "data candle",
                    "traded the news candle",
                    "entered into cpi",
                    "entered into fomc",
                ],
            },
            TriggerGroup {
                confidence: 0.7,
                phrases: &[
                    "traded the first 5 minutes",
                    "first five minutes",
                    "gambled the open",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::HesitationMissedEntry,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &["hesitated", "hesitation", "froze at the entry"],
            },
            TriggerGroup {
                confidence: 0.8,
                phrases: &[
                    "missed the entry",
                    "missed my entry",
                    "watched it go without me",
                ],
            },
        ],
    },
    TagSpec {
        tag: TagName::Overtrading,
        severity: Severity::High,
        triggers: &[
            TriggerGroup {
                confidence: 1.0,
                phrases: &["overtraded", "overtrading", "too many trades"],
            },
            TriggerGroup {
                confidence: 0.9,
                phrases: &["revenge trade", "revenge trading", "kept clicking"],
            },
        ],
    },
    TagSpec {
        tag: TagName::ProcessError,
        severity: Severity::Med,
        triggers: &[
            TriggerGroup {
                confidence: 0.9,
                phrases: &[
                    "broke my rules",
                    "broke my own rules",
                    "process error",
                    "didn't follow the plan",
                    "did not follow my plan",
                ],
            },
            TriggerGroup {
                confidence: 0.8,
                phrases: &["no stop in place", "forgot my stop", "skipped my checklist"],
            },
        ],
    },
];
