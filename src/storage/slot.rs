// Durable key-value slots backing the setup store

use crate::errors::SagbookError;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait defining the durable key-value binding the store writes through
pub trait SlotBackend {
    /// Read the raw payload held by a slot, `None` when the slot was never written
    fn read(&self, key: &str) -> Result<Option<String>, SagbookError>;

    /// Replace the payload held by a slot
    fn write(&mut self, key: &str, payload: &str) -> Result<(), SagbookError>;
}

/// File-based slots, one JSON file per key
pub struct FileSlot {
    /// Base directory holding the slot files
    storage_path: PathBuf,
}

impl FileSlot {
    /// Create slots under the given directory, creating it if needed
    pub fn new(storage_path: PathBuf) -> Result<Self, SagbookError> {
        fs::create_dir_all(&storage_path).map_err(|e| SagbookError::SlotWrite {
            key: storage_path.display().to_string(),
            source: e,
        })?;

        Ok(Self { storage_path })
    }

    /// Create slots in the default application data directory
    pub fn new_default() -> Result<Self, SagbookError> {
        Self::new(Self::default_storage_path()?)
    }

    pub fn default_storage_path() -> Result<PathBuf, SagbookError> {
        let app_data_dir = dirs::data_dir().ok_or(SagbookError::NoDataDir)?;
        Ok(app_data_dir.join("sagbook"))
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// File holding the payload of a slot
    pub fn file_path_for_key(&self, key: &str) -> PathBuf {
        self.storage_path
            .join(format!("{}.json", Self::normalize_key(key)))
    }

    fn normalize_key(key: &str) -> String {
        key.to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    }
}

impl SlotBackend for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SagbookError> {
        let file_path = self.file_path_for_key(key);

        if !file_path.exists() {
            log::debug!("Slot file does not exist: {:?}", file_path);
            return Ok(None);
        }

        fs::read_to_string(&file_path)
            .map(Some)
            .map_err(|e| SagbookError::SlotRead {
                key: key.to_string(),
                source: e,
            })
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), SagbookError> {
        let file_path = self.file_path_for_key(key);
        let temp_path = file_path.with_extension("json.tmp");
        let write_error = |e: std::io::Error| SagbookError::SlotWrite {
            key: key.to_string(),
            source: e,
        };

        // Write to temporary file first so a failed write keeps the previous payload
        {
            let mut temp_file = fs::File::create(&temp_path).map_err(write_error)?;
            temp_file.write_all(payload.as_bytes()).map_err(write_error)?;
            temp_file.sync_all().map_err(write_error)?;
        }

        fs::rename(&temp_path, &file_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(e)
        })?;

        log::debug!("Wrote {} bytes to {:?}", payload.len(), file_path);
        Ok(())
    }
}

/// In-process slots with an optional byte quota, mirroring browser storage limits
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total number of bytes held across all slots
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Total payload bytes currently held
    pub fn used_bytes(&self) -> usize {
        self.slots.values().map(String::len).sum()
    }
}

impl SlotBackend for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SagbookError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), SagbookError> {
        if let Some(quota) = self.quota {
            let replaced = self.slots.get(key).map_or(0, String::len);
            let needed = self.used_bytes() - replaced + payload.len();
            if needed > quota {
                return Err(SagbookError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.slots.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
