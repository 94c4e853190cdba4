//! Save/load system
//!
//! Handles the persisted progress blob and where it lives.

pub mod progress;
pub mod store;

pub use progress::{ActivityRecord, ProgressState, PLACEHOLDER_NAME, STATE_VERSION};
pub use store::{JsonFileStore, MemoryStore, ProgressStore, SaveError, DEFAULT_SLOT};
