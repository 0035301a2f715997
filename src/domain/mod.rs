mod entry;
mod plan;
mod tag;

pub use entry::{JournalEntry, ParsedEntry, SetupDetails};
pub use plan::DailyPlan;
pub use tag::{DetectedTag, Severity, TagFamily, TagName};
