#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod catalog;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::aggregate::{AggregateReport, TagShare, aggregate};
pub use analysis::parser::{parse_journal, parse_journal_as_of};
pub use analysis::plan::generate_plan;
pub use analysis::rule_engine::detect_tags;
pub use analysis::scoring::score_tags;
pub use config::{BatchSettings, Confidence, ProcessScore};
pub use data::{
    JournalStore, MemoryJournalStore, RemoteTag, SemanticClassifier, SqliteJournalStore,
};
pub use domain::{DailyPlan, DetectedTag, JournalEntry, ParsedEntry, Severity, TagFamily, TagName};
pub use engine::AnalysisPipeline;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Journal text file to analyze (may hold many concatenated entries)
    pub path: PathBuf,

    /// Generate the plan as of this date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<chrono::NaiveDate>,

    /// Persist the analyzed entries to this sqlite database
    #[arg(long)]
    pub db: Option<PathBuf>,
}
