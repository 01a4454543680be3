use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SagbookError;
use crate::storage::{DEFAULT_SLOT_KEY, FileSlot};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the slot files, defaults to the platform data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            slot_key: default_slot_key(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, SagbookError> {
        Ok(dirs::config_dir()
            .ok_or(SagbookError::NoDataDir)?
            .join("sagbook")
            .join(CONFIG_FILE_NAME))
    }

    /// Read the user's config file, falling back to defaults when there is none
    pub fn load() -> Result<Self, SagbookError> {
        Self::from_file(&Self::default_path()?)
    }

    pub fn from_file(config_path: &Path) -> Result<Self, SagbookError> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let file = std::fs::File::open(config_path).map_err(|e| SagbookError::ConfigIo {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(file).map_err(|e| SagbookError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self) -> Result<(), SagbookError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), SagbookError> {
        let io_error = |e: std::io::Error| SagbookError::ConfigIo {
            path: config_path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = std::fs::File::create(config_path).map_err(io_error)?;
        serde_json::to_writer_pretty(file, self).map_err(|e| SagbookError::ConfigSerialize {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Open the slot directory this config points at
    pub fn open_slot(&self) -> Result<FileSlot, SagbookError> {
        match &self.data_dir {
            Some(dir) => FileSlot::new(dir.clone()),
            None => FileSlot::new_default(),
        }
    }
}
