//! Remote classification pacing configuration
//!
//! These are caller-supplied knobs, not fixed policy: the rate limit we
//! are pacing against belongs to whatever semantic backend got injected.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct BatchSettings {
    /// How many entries are classified concurrently per batch.
    pub batch_size: usize,

    /// Mandatory pause between consecutive batches.
    pub batch_delay: Duration,

    /// Per-call deadline. A call that misses it degrades that entry to
    /// rule-engine-only tags.
    pub call_timeout: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_millis(1000),
            call_timeout: Duration::from_secs(20),
        }
    }
}

impl BatchSettings {
    /// Zero-size batches would make the pipeline spin without progress.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
