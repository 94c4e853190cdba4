//! Progression systems

pub mod xp;
pub mod scoring;
pub mod inactivity;

pub use xp::{MAX_LEVEL, MILESTONES, xp_needed, is_milestone, level_title};
pub use scoring::{ActivityKind, EventInput, Rejection, ScoredEvent, ValidationError, score_event, parse_date};
pub use inactivity::{PenaltyOutcome, activity_instant, compute_penalty, days_elapsed};
