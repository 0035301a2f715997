mod pipeline;

pub use pipeline::{AnalysisPipeline, merge_tag_sources};
