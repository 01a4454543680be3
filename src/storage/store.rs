// Setup store: owns the setup collection held in a single slot

use std::collections::HashSet;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::errors::SagbookError;
use crate::setup::{SetupCollection, SetupRecord};
use crate::storage::slot::SlotBackend;

/// Slot key holding the setup list unless configured otherwise
pub const DEFAULT_SLOT_KEY: &str = "suspension-setups";

/// Callback invoked with the new collection after every successful write
pub type ChangeListener = Box<dyn Fn(&[SetupRecord])>;

/// Durable owner of the setup collection.
///
/// Reads fail soft: a missing, unreadable or invalid slot loads as an empty
/// collection. Writes always replace the whole collection and report failures
/// to the caller.
pub struct SetupStore<B: SlotBackend> {
    backend: B,
    key: String,
    revision: u64,
    listeners: Vec<ChangeListener>,
}

impl<B: SlotBackend> SetupStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Direct access to the slot. Writes made through it bypass listeners and the revision counter.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Number of successful writes made through this store
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a listener notified after every successful `save` or `append`
    pub fn subscribe(&mut self, listener: impl Fn(&[SetupRecord]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Load the stored collection, or an empty one if the slot holds nothing usable
    pub fn load(&self) -> SetupCollection {
        match self.load_or_discard() {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Could not read setups from slot {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Like `load`, but a slot that cannot be read at all is an error.
    /// Unparsable or invalid contents are still discarded.
    fn load_or_discard(&self) -> Result<SetupCollection, SagbookError> {
        match self.try_load() {
            Err(e @ SagbookError::SlotRead { .. }) => Err(e),
            Err(e) => {
                warn!("Discarding setups stored in slot {}: {}", self.key, e);
                Ok(Vec::new())
            }
            ok => ok,
        }
    }

    fn try_load(&self) -> Result<SetupCollection, SagbookError> {
        let Some(payload) = self.backend.read(&self.key)? else {
            debug!("Slot {} is empty", self.key);
            return Ok(Vec::new());
        };

        let collection: SetupCollection =
            serde_json::from_str(&payload).map_err(|e| SagbookError::SlotParse {
                key: self.key.clone(),
                source: e,
            })?;
        validate_collection(&collection)?;

        debug!("Loaded {} setups from slot {}", collection.len(), self.key);
        Ok(collection)
    }

    /// Replace the stored collection
    pub fn save(&mut self, collection: &[SetupRecord]) -> Result<(), SagbookError> {
        validate_collection(collection)?;

        let payload = serde_json::to_string_pretty(collection)
            .map_err(|e| SagbookError::Serialize { source: e })?;
        self.backend.write(&self.key, &payload)?;
        self.revision += 1;

        debug!(
            "Saved {} setups to slot {} (revision {})",
            collection.len(),
            self.key,
            self.revision
        );
        for listener in &self.listeners {
            listener(collection);
        }
        Ok(())
    }

    /// Store a new setup in front of the existing ones and return the new collection
    pub fn append(&mut self, record: SetupRecord) -> Result<SetupCollection, SagbookError> {
        record.validate()?;

        // a read failure must not turn into an overwrite of the whole history
        let mut collection = self.load_or_discard()?;
        if collection.iter().any(|existing| existing.id() == record.id()) {
            return Err(SagbookError::DuplicateId { id: record.id() });
        }

        let id = record.id();
        let track_name = record.track_name.clone();
        collection.insert(0, record);
        self.save(&collection)?;

        info!("Stored setup {} for {}", id, track_name);
        Ok(collection)
    }

    /// Look up a stored setup by id
    pub fn find(&self, id: Uuid) -> Option<SetupRecord> {
        self.load().into_iter().find(|record| record.id() == id)
    }
}

/// Reject collections with invalid records or repeated ids
fn validate_collection(collection: &[SetupRecord]) -> Result<(), SagbookError> {
    let mut ids = HashSet::new();
    for record in collection {
        record.validate()?;
        if !ids.insert(record.id()) {
            return Err(SagbookError::DuplicateId { id: record.id() });
        }
    }
    Ok(())
}
