// Setup filtering
// Pure narrowing of a setup collection plus a cached view for presentation layers

pub mod query;
pub mod view;

// Re-export commonly used types
pub use query::{SetupQuery, track_names};
pub use view::SetupView;
