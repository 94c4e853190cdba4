//! Transient banners
//!
//! Alert and level-up banners that hide themselves after a fixed time.

use std::time::{Duration, Instant};

/// How long an alert stays up
pub const ALERT_DURATION: Duration = Duration::from_secs(5);

/// How long the level-up banner stays up
pub const LEVEL_UP_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    expires_at: Instant,
}

impl Banner {
    fn new(text: String, now: Instant, duration: Duration) -> Self {
        Self {
            text,
            expires_at: now + duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// The banners currently on screen
#[derive(Debug, Clone, Default)]
pub struct Banners {
    alert: Option<Banner>,
    level_up: Option<(u32, Banner)>,
}

impl Banners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an alert, replacing any alert still up
    pub fn show_alert(&mut self, text: impl Into<String>, now: Instant) {
        self.alert = Some(Banner::new(text.into(), now, ALERT_DURATION));
    }

    /// Show the level-up banner for `level`
    pub fn show_level_up(&mut self, level: u32, now: Instant) {
        let text = format!("LEVEL UP! {}", level);
        self.level_up = Some((level, Banner::new(text, now, LEVEL_UP_DURATION)));
    }

    /// Drop banners whose time is up
    pub fn tick(&mut self, now: Instant) {
        if self.alert.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.alert = None;
        }
        if self.level_up.as_ref().is_some_and(|(_, b)| b.is_expired(now)) {
            self.level_up = None;
        }
    }

    pub fn alert(&self) -> Option<&Banner> {
        self.alert.as_ref()
    }

    pub fn level_up(&self) -> Option<(u32, &Banner)> {
        self.level_up.as_ref().map(|(level, banner)| (*level, banner))
    }
}
