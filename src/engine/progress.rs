//! Progress engine
//!
//! Owns the progress state, scores study events into XP, resolves level-ups,
//! and applies the inactivity penalty. Every mutation is written through the
//! store before returning.

use chrono::{DateTime, NaiveDate, Utc};

use crate::data::ScoringRules;
use crate::progression::{
    self, ActivityKind, EventInput, PenaltyOutcome, Rejection, ValidationError, MAX_LEVEL,
    activity_instant, compute_penalty, is_milestone, score_event, xp_needed,
};
use crate::save::{ActivityRecord, ProgressState, ProgressStore};

use super::EngineEvent;

/// What an accepted study event did
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub kind: ActivityKind,
    pub xp_awarded: f64,
    /// Levels reached because of this event, in order
    pub levels_gained: Vec<u32>,
}

/// The XP and leveling state machine
pub struct ProgressEngine<S: ProgressStore> {
    /// Current progress
    state: ProgressState,
    /// Where progress is persisted
    store: S,
    /// XP table for events and inactivity
    rules: ScoringRules,
    /// Notifications not yet taken by the renderer
    events: Vec<EngineEvent>,
}

impl<S: ProgressStore> ProgressEngine<S> {
    /// Restore progress from `store`, or start fresh if nothing usable is saved
    pub fn load(store: S, rules: ScoringRules) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                ProgressState::new()
            }
            Err(e) => {
                log::warn!("Failed to load progress: {}, starting fresh", e);
                ProgressState::new()
            }
        };
        Self::with_state(state, store, rules)
    }

    /// Wrap an existing state without touching the store
    pub fn with_state(state: ProgressState, store: S, rules: ScoringRules) -> Self {
        Self {
            state,
            store,
            rules,
            events: Vec::new(),
        }
    }

    // =========================================================================
    // Study events
    // =========================================================================

    /// Validate, score and log one study event.
    ///
    /// Rejected events leave the state untouched; the reason is also queued
    /// as [`EngineEvent::Rejected`].
    pub fn record_event(&mut self, date: &str, input: &EventInput) -> Result<EventOutcome, Rejection> {
        let scored = score_event(date, input, &self.rules).and_then(|scored| {
            if (self.state.xp + scored.xp).is_finite() {
                Ok(scored)
            } else {
                Err(Rejection::Invalid {
                    kind: scored.kind,
                    source: ValidationError::XpOutOfRange,
                })
            }
        });
        let scored = match scored {
            Ok(scored) => scored,
            Err(reason) => {
                log::info!("Rejected {:?} event: {}", input.kind(), reason);
                self.events.push(EngineEvent::Rejected(reason.clone()));
                return Err(reason);
            }
        };

        let levels_gained = self.gain_xp(scored.xp);
        self.state.records.insert(
            0,
            ActivityRecord {
                kind: scored.kind,
                date: scored.date,
                details: scored.details,
                xp_awarded: scored.xp,
            },
        );
        self.advance_last_activity(scored.date);

        log::info!(
            "Logged {:?} on {} for {} XP (level {}, {} XP)",
            scored.kind, scored.date, scored.xp, self.state.level, self.state.xp
        );
        self.commit();

        Ok(EventOutcome {
            kind: scored.kind,
            xp_awarded: scored.xp,
            levels_gained,
        })
    }

    /// Add XP and resolve any level-ups. Returns the levels reached.
    pub fn add_xp(&mut self, amount: f64) -> Vec<u32> {
        let levels = self.gain_xp(amount);
        self.commit();
        levels
    }

    fn gain_xp(&mut self, amount: f64) -> Vec<u32> {
        if !amount.is_finite() || amount < 0.0 {
            log::warn!("Ignoring invalid XP amount {}", amount);
            return Vec::new();
        }
        if !(self.state.xp + amount).is_finite() {
            log::warn!("Ignoring XP amount {} that would overflow the total", amount);
            return Vec::new();
        }

        self.state.xp += amount;

        let mut levels = Vec::new();
        while self.state.xp >= xp_needed(self.state.level) && self.state.level < MAX_LEVEL {
            self.state.xp -= xp_needed(self.state.level);
            self.state.level += 1;
            levels.push(self.state.level);
            self.on_level_up(self.state.level);
        }
        levels
    }

    fn on_level_up(&mut self, new_level: u32) {
        log::info!("Level up! Now level {}", new_level);
        self.events.push(EngineEvent::LevelUp(new_level));

        if is_milestone(new_level) {
            self.state.theme_level = new_level;
            self.events.push(EngineEvent::ThemeChanged(new_level));
        }
    }

    /// Move the last-activity timestamp forward to `date_str`.
    ///
    /// Dates at or before the stored one, and unparseable dates, are ignored.
    /// Returns whether the timestamp moved.
    pub fn update_last_activity(&mut self, date_str: &str) -> bool {
        let date = match progression::parse_date(date_str) {
            Ok(date) => date,
            Err(e) => {
                log::warn!("Ignoring last-activity update: {}", e);
                return false;
            }
        };
        let moved = self.advance_last_activity(date);
        if moved {
            self.commit();
        }
        moved
    }

    fn advance_last_activity(&mut self, date: NaiveDate) -> bool {
        let instant = activity_instant(date);
        match self.state.last_activity {
            Some(current) if instant <= current => false,
            _ => {
                self.state.last_activity = Some(instant);
                true
            }
        }
    }

    // =========================================================================
    // Inactivity
    // =========================================================================

    /// Deduct XP for whole days since the last activity, as of now.
    ///
    /// Call once per session start: it does not move the last-activity
    /// timestamp, so a second call deducts again.
    pub fn apply_inactivity_penalty(&mut self) -> Option<PenaltyOutcome> {
        self.apply_inactivity_penalty_at(Utc::now())
    }

    /// Same as [`Self::apply_inactivity_penalty`] with an explicit clock
    pub fn apply_inactivity_penalty_at(&mut self, now: DateTime<Utc>) -> Option<PenaltyOutcome> {
        let outcome = compute_penalty(
            self.state.last_activity,
            now,
            self.state.xp,
            self.rules.penalty_per_day,
        )?;

        // Level is never lowered, only the XP inside it
        self.state.xp = (self.state.xp - outcome.deducted).max(0.0);
        log::info!(
            "Missed {} day(s), deducted {} XP (now {} XP)",
            outcome.days_missed, outcome.deducted, self.state.xp
        );

        self.events.push(EngineEvent::InactivityPenalty {
            days_missed: outcome.days_missed,
            deducted: outcome.deducted,
        });
        self.commit();
        Some(outcome)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// True until the user has chosen a name
    pub fn needs_display_name(&self) -> bool {
        self.state.has_placeholder_name()
    }

    /// Set the display name. Blank names are ignored.
    pub fn set_display_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.state.display_name = name.to_string();
        self.commit();
        true
    }

    /// Start over from level 0, keeping the display name
    pub fn reset(&mut self) {
        let display_name = std::mem::take(&mut self.state.display_name);
        self.state = ProgressState {
            display_name,
            ..ProgressState::default()
        };
        log::info!("Progress reset");
        self.commit();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Full persisted state
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Name shown in the header
    pub fn display_name(&self) -> &str {
        &self.state.display_name
    }

    /// XP held toward the next level
    pub fn current_xp(&self) -> f64 {
        self.state.xp
    }

    /// Current level, 0 to MAX_LEVEL
    pub fn current_level(&self) -> u32 {
        self.state.level
    }

    /// XP required to leave the current level
    pub fn xp_needed_for_next(&self) -> f64 {
        xp_needed(self.state.level)
    }

    /// Fill of the progress bar, 0.0 to 1.0
    pub fn progress_fraction(&self) -> f64 {
        (self.state.xp / self.xp_needed_for_next()).clamp(0.0, 1.0)
    }

    /// Logged events, most recent first
    pub fn activity_log(&self) -> &[ActivityRecord] {
        &self.state.records
    }

    /// Milestone level the active theme belongs to
    pub fn current_theme_level(&self) -> u32 {
        self.state.theme_level
    }

    /// Latest activity instant, if any event was logged
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.state.last_activity
    }

    /// Scoring rules in effect
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Backing persistence store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn commit(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            log::warn!("Failed to save progress: {}", e);
        }
        self.events.push(EngineEvent::StateChanged);
    }
}
