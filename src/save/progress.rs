//! Persisted progress aggregate
//!
//! The single blob the engine reads on startup and rewrites after every change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::progression::ActivityKind;

/// Current save format version
pub const STATE_VERSION: u32 = 1;

/// Name shown until the user picks one
pub const PLACEHOLDER_NAME: &str = "User";

/// One logged and scored study event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub kind: ActivityKind,
    /// Date the user says the session happened
    pub date: NaiveDate,
    pub details: String,
    pub xp_awarded: f64,
}

impl ActivityRecord {
    /// One-line rendering for the records list
    pub fn summary(&self) -> String {
        format!(
            "[{}] Date: {} | Details: {} | XP Earned: {}",
            self.kind.tag(),
            self.date,
            self.details,
            self.xp_awarded
        )
    }
}

/// Everything the tracker knows about one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,
    pub display_name: String,
    /// Progress inside the current level
    pub xp: f64,
    pub level: u32,
    /// Most recent first
    pub records: Vec<ActivityRecord>,
    pub last_activity: Option<DateTime<Utc>>,
    /// Highest milestone reached, never lowered
    pub theme_level: u32,
}

fn default_version() -> u32 {
    STATE_VERSION
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            display_name: PLACEHOLDER_NAME.to_string(),
            xp: 0.0,
            level: 0,
            records: Vec::new(),
            last_activity: None,
            theme_level: 0,
        }
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the placeholder name is in use
    pub fn has_placeholder_name(&self) -> bool {
        self.display_name == PLACEHOLDER_NAME
    }
}
