// Setup query: narrows a setup collection by track, condition and free text

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::setup::SetupRecord;

/// Filter criteria for the setup history.
///
/// Every field is optional and an absent or blank field places no constraint.
/// All comparisons are case-insensitive substring matches, including the
/// condition, so `"pack"` matches `Hard-Pack`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetupQuery {
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub search_query: Option<String>,
}

impl SetupQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track_name(mut self, track_name: impl Into<String>) -> Self {
        self.track_name = Some(track_name.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_search_query(mut self, search_query: impl Into<String>) -> Self {
        self.search_query = Some(search_query.into());
        self
    }

    /// True when the query places no constraint at all
    pub fn is_empty(&self) -> bool {
        self.matcher().is_unconstrained()
    }

    /// Check a single setup against the query
    pub fn matches(&self, record: &SetupRecord) -> bool {
        self.matcher().matches(record)
    }

    /// Keep the matching setups, in their original order
    pub fn apply(&self, records: &[SetupRecord]) -> Vec<SetupRecord> {
        let matcher = self.matcher();
        records
            .iter()
            .filter(|record| matcher.matches(record))
            .cloned()
            .collect()
    }

    fn matcher(&self) -> Matcher {
        Matcher {
            track_name: needle(&self.track_name),
            condition: needle(&self.condition),
            search_query: needle(&self.search_query),
        }
    }
}

/// Lowercased needles, computed once per filter pass
struct Matcher {
    track_name: Option<String>,
    condition: Option<String>,
    search_query: Option<String>,
}

impl Matcher {
    fn is_unconstrained(&self) -> bool {
        self.track_name.is_none() && self.condition.is_none() && self.search_query.is_none()
    }

    fn matches(&self, record: &SetupRecord) -> bool {
        let matches_track = self
            .track_name
            .as_deref()
            .is_none_or(|q| contains(&record.track_name, q));
        let matches_condition = self
            .condition
            .as_deref()
            .is_none_or(|q| contains(record.conditions.label(), q));
        let matches_search = self.search_query.as_deref().is_none_or(|q| {
            contains(&record.track_name, q)
                || contains(&record.notes, q)
                || record.tags.iter().any(|tag| contains(tag, q))
        });

        matches_track && matches_condition && matches_search
    }
}

fn needle(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Distinct track names in the collection, sorted for display
pub fn track_names(records: &[SetupRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.track_name.as_str())
        .unique()
        .sorted_by_key(|name| name.to_lowercase())
        .map(str::to_string)
        .collect()
}
