// Library interface for sagbook
// This allows the CLI and integration tests to share the setup model, store and filter

pub mod config;
pub mod errors;
pub mod export;
pub mod filter;
pub mod setup;
pub mod storage;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::SagbookError;
pub use filter::{SetupQuery, SetupView};
pub use setup::{SetupCollection, SetupDraft, SetupRecord, TrackCondition};
pub use storage::{FileSlot, MemorySlot, SetupStore, SlotBackend};
