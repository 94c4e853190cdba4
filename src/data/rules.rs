//! RON scoring rules loader
//!
//! Loads the XP scoring table from an external RON file, with fallback to
//! the built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the scoring table inside the config directory
pub const RULES_FILE: &str = "rules.ron";

/// How drill sessions are scored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrillScoring {
    /// XP per logged hour, fractional hours allowed
    PerHour(f64),
    /// Fixed XP per drill regardless of duration
    Flat(f64),
}

impl DrillScoring {
    /// XP for a drill of `hours` length
    pub fn xp_for(&self, hours: f64) -> f64 {
        match *self {
            DrillScoring::PerHour(rate) => rate * hours,
            DrillScoring::Flat(xp) => xp,
        }
    }
}

/// Tunable XP table for study events and inactivity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Scores strictly above this earn `test_high_xp`
    pub test_high_threshold: u32,
    pub test_high_xp: f64,
    /// Scores strictly above this (and not above the high threshold) earn `test_mid_xp`
    pub test_mid_threshold: u32,
    pub test_mid_xp: f64,
    pub drill_scoring: DrillScoring,
    /// Flat XP per practice section
    pub section_xp: f64,
    /// XP lost for every whole day without activity
    pub penalty_per_day: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            test_high_threshold: 170,
            test_high_xp: 5.0,
            test_mid_threshold: 165,
            test_mid_xp: 3.0,
            drill_scoring: DrillScoring::PerHour(5.0),
            section_xp: 5.0,
            penalty_per_day: 10.0,
        }
    }
}

impl ScoringRules {
    /// Load rules from `dir/rules.ron`, or fall back to defaults
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(RULES_FILE);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(rules) => {
                        log::info!("Scoring rules loaded from {:?}", path);
                        return rules;
                    }
                    Err(e) => log::warn!("Failed to parse {}: {}, using defaults", RULES_FILE, e),
                },
                Err(e) => log::warn!("Failed to read {}: {}, using defaults", RULES_FILE, e),
            }
        }
        Self::default()
    }

    /// XP awarded for a test score, zero when the score is too low
    pub fn test_xp(&self, score: u32) -> f64 {
        if score > self.test_high_threshold {
            self.test_high_xp
        } else if score > self.test_mid_threshold {
            self.test_mid_xp
        } else {
            0.0
        }
    }
}

/// Write the default scoring table to `dir/rules.ron` for easy editing
pub fn export_default_rules(dir: &Path) -> Result<(), String> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {:?}: {}", dir, e))?;
    }

    let rules_ron = ron::ser::to_string_pretty(&ScoringRules::default(), ron::ser::PrettyConfig::default())
        .map_err(|e| format!("Failed to serialize rules: {}", e))?;
    fs::write(dir.join(RULES_FILE), rules_ron)
        .map_err(|e| format!("Failed to write {}: {}", RULES_FILE, e))?;

    Ok(())
}
