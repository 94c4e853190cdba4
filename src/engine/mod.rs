//! Engine module - XP state machine and its persistence

mod events;
mod progress;

pub use events::EngineEvent;
pub use progress::{EventOutcome, ProgressEngine};
