// Suspension setup data model
// A setup is created once from a submitted draft and never mutated afterwards

pub mod types;

// Re-export commonly used types
pub use types::{PRESET_TAGS, SetupCollection, SetupDraft, SetupRecord, TrackCondition};

#[cfg(test)]
pub(crate) mod strategies;
