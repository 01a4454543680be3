// Filtered view over a setup store, recomputed on read when stale

use crate::filter::query::SetupQuery;
use crate::setup::SetupRecord;
use crate::storage::{SetupStore, SlotBackend};

/// Cached result of applying a query to a store.
///
/// The rows are recomputed only when the query changed or the store has been
/// written since the last read.
#[derive(Debug, Default)]
pub struct SetupView {
    query: SetupQuery,
    seen_revision: Option<u64>,
    rows: Vec<SetupRecord>,
}

impl SetupView {
    pub fn new(query: SetupQuery) -> Self {
        Self {
            query,
            seen_revision: None,
            rows: Vec::new(),
        }
    }

    pub fn query(&self) -> &SetupQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: SetupQuery) {
        if query != self.query {
            self.query = query;
            self.seen_revision = None;
        }
    }

    /// True when the next call to `rows` will recompute
    pub fn is_stale<B: SlotBackend>(&self, store: &SetupStore<B>) -> bool {
        self.seen_revision != Some(store.revision())
    }

    pub fn rows<B: SlotBackend>(&mut self, store: &SetupStore<B>) -> &[SetupRecord] {
        if self.is_stale(store) {
            self.rows = self.query.apply(&store.load());
            self.seen_revision = Some(store.revision());
        }
        &self.rows
    }
}
