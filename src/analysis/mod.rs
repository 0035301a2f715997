// Journal parsing and behavioral analysis
pub mod aggregate;
pub mod parser;
pub mod plan;
pub mod rule_engine;
pub mod scoring;
