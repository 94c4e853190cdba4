//! LSAT Leveling - XP and levels for LSAT study
//!
//! Log practice tests, drills and sections, earn XP, level up,
//! and lose ground for every day you skip.

pub mod config;
pub mod data;
pub mod engine;
pub mod progression;
pub mod save;
pub mod ui;

// Re-export commonly used types
pub use engine::{EngineEvent, EventOutcome, ProgressEngine};
pub use progression::{ActivityKind, EventInput, Rejection};
pub use save::{ActivityRecord, ProgressState, ProgressStore};
