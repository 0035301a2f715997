mod classifier;
mod store;

pub use classifier::{RemoteTag, SemanticClassifier, sanitize_remote_tags};
pub use store::{JournalStore, MemoryJournalStore, SqliteJournalStore};
