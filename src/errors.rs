// Error types for sagbook

use snafu::Snafu;
use std::{io, path::PathBuf};
use uuid::Uuid;

#[derive(Debug, Snafu)]
pub enum SagbookError {
    // Setup construction errors
    #[snafu(display("Invalid value for {field}: {reason}"))]
    InvalidField { field: String, reason: String },
    #[snafu(display("Unknown track condition: {value}"))]
    UnknownCondition { value: String },
    #[snafu(display("A setup with id {id} is already stored"))]
    DuplicateId { id: Uuid },
    #[snafu(display("No setup found with id {id}"))]
    SetupNotFound { id: String },

    // Slot read errors, recovered by the store
    #[snafu(display("Error reading slot {key}"))]
    SlotRead { key: String, source: io::Error },
    #[snafu(display("Slot {key} does not hold a valid setup list"))]
    SlotParse {
        key: String,
        source: serde_json::Error,
    },

    // Slot write errors, surfaced to the caller
    #[snafu(display("Error writing slot {key}"))]
    SlotWrite { key: String, source: io::Error },
    #[snafu(display("Slot {key} quota exceeded: {needed} bytes needed, {quota} allowed"))]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[snafu(display("Error serializing setups"))]
    Serialize { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to store setups"))]
    NoDataDir,
    #[snafu(display("Error accessing config file {}", path.display()))]
    ConfigIo { path: PathBuf, source: io::Error },
    #[snafu(display("Error parsing config file {}", path.display()))]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[snafu(display("Error serializing config file {}", path.display()))]
    ConfigSerialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Export errors
    #[snafu(display("Error exporting setups to {}", path.display()))]
    Export { path: PathBuf, source: io::Error },
}
