// Setup persistence
// Provides the slot abstraction and the store that owns the setup collection

pub mod slot;
pub mod store;

// Re-export commonly used types
pub use slot::{FileSlot, MemorySlot, SlotBackend};
pub use store::{ChangeListener, DEFAULT_SLOT_KEY, SetupStore};
