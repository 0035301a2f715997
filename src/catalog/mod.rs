mod tags;

pub use tags::{TAG_CATALOG, TagSpec, TriggerGroup};

use crate::domain::{Severity, TagName};

/// Look up a tag's catalog record. Total over `TagName`: the test below
/// pins every variant to exactly one entry.
pub fn spec(tag: TagName) -> &'static TagSpec {
    TAG_CATALOG
        .iter()
        .find(|s| s.tag == tag)
        .expect("tag catalog covers every TagName variant")
}

/// The fixed severity declared for a tag.
pub fn severity(tag: TagName) -> Severity {
    spec(tag).severity
}
