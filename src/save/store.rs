//! Progress storage
//!
//! Loads and saves the progress blob under a single named slot.

use std::fs;
use std::path::PathBuf;

use super::progress::{ProgressState, STATE_VERSION};

/// Slot name the state is kept under
pub const DEFAULT_SLOT: &str = "lsat_solo_state";

/// Save error types
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Key-value persistence for the progress blob
pub trait ProgressStore {
    /// Load the stored state, `None` if nothing was saved yet
    fn load(&self) -> Result<Option<ProgressState>, SaveError>;

    /// Replace the stored state
    fn save(&mut self, state: &ProgressState) -> Result<(), SaveError>;
}

fn decode(json: &str) -> Result<ProgressState, SaveError> {
    let state: ProgressState = serde_json::from_str(json)?;
    if state.version != STATE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: STATE_VERSION,
            found: state.version,
        });
    }
    Ok(state)
}

/// Stores the state as pretty JSON in `<dir>/<slot>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    slot: String,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            slot: slot.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.slot))
    }

}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<ProgressState>, SaveError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let state = decode(&data)?;
        log::info!("Progress loaded from {:?}", path);
        Ok(Some(state))
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), SaveError> {
        // Ensure directory exists
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(state)?;
        let path = self.path();
        fs::write(&path, json)?;

        log::debug!("Progress saved to {:?}", path);
        Ok(())
    }
}

/// Keeps the serialized blob in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing serialized blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<ProgressState>, SaveError> {
        self.blob.as_deref().map(decode).transpose()
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), SaveError> {
        self.blob = Some(serde_json::to_string(state)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::ActivityKind;
    use crate::save::ActivityRecord;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_state() -> ProgressState {
        ProgressState {
            display_name: "Ada".to_string(),
            xp: 12.5,
            level: 5,
            records: vec![
                ActivityRecord {
                    kind: ActivityKind::Drill,
                    date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    details: "Hours: 2.5".to_string(),
                    xp_awarded: 12.5,
                },
                ActivityRecord {
                    kind: ActivityKind::Test,
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    details: "Score: 172".to_string(),
                    xp_awarded: 5.0,
                },
            ],
            last_activity: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            theme_level: 5,
            ..ProgressState::default()
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lsat_leveling_store_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = scratch_dir("round_trip");
        let mut store = JsonFileStore::new(&dir, DEFAULT_SLOT);
        assert!(store.load().unwrap().is_none());

        let state = sample_state();
        store.save(&state).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some(state));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_capped_state_with_huge_xp_round_trips() {
        let dir = scratch_dir("capped");
        let mut store = JsonFileStore::new(&dir, DEFAULT_SLOT);

        let state = ProgressState {
            level: 100,
            xp: 1e300,
            theme_level: 100,
            ..sample_state()
        };
        store.save(&state).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.xp, 1e300);
        assert_eq!(loaded, state);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_version_mismatch() {
        let mut state = sample_state();
        state.version = STATE_VERSION + 1;
        let blob = serde_json::to_string(&state).unwrap();

        let store = MemoryStore::with_blob(blob);
        let err = store.load().unwrap_err();
        assert!(matches!(err, SaveError::VersionMismatch { found, .. } if found == STATE_VERSION + 1));
    }

    #[test]
    fn test_corrupt_blob() {
        let store = MemoryStore::with_blob("{ not json");
        assert!(matches!(store.load(), Err(SaveError::Parse(_))));
    }
}
