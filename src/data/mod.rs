//! External data
//!
//! Tunable tables loaded from RON files.

pub mod rules;

pub use rules::{DrillScoring, ScoringRules, RULES_FILE, export_default_rules};
