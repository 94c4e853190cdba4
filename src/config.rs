//! File locations
//!
//! Where the progress blob and the scoring rules live.

use std::path::PathBuf;

/// Environment variable that puts all files in one directory
pub const HOME_ENV: &str = "LSAT_LEVELING_HOME";

/// Log file written by the dashboard
pub const LOG_FILE: &str = "lsat-leveling.log";

/// Resolved directories for data and config
#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    /// Progress blob
    pub data_dir: PathBuf,
    /// `rules.ron`
    pub config_dir: PathBuf,
}

impl AppPaths {
    /// Resolve from the environment, then the platform directories
    pub fn resolve() -> Self {
        Self::from_home(std::env::var_os(HOME_ENV).map(PathBuf::from))
    }

    /// Use `home` for everything if given, else the platform directories
    pub fn from_home(home: Option<PathBuf>) -> Self {
        if let Some(home) = home.filter(|h| !h.as_os_str().is_empty()) {
            return Self {
                data_dir: home.clone(),
                config_dir: home,
            };
        }

        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "lsat-leveling", "LsatLeveling") {
            Self {
                data_dir: proj_dirs.data_local_dir().to_path_buf(),
                config_dir: proj_dirs.config_dir().to_path_buf(),
            }
        } else {
            // Fallback to current directory
            Self {
                data_dir: PathBuf::from("."),
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Where the log file goes
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
