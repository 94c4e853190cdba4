//! Engine notifications
//!
//! One-way signals from the engine to whatever renders it. The engine only
//! queues them; timing and display belong to the renderer.

use crate::progression::Rejection;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Persisted state changed, re-read the queries
    StateChanged,
    /// A new level was reached
    LevelUp(u32),
    /// A milestone level switched the theme
    ThemeChanged(u32),
    /// A study event earned nothing
    Rejected(Rejection),
    /// XP was lost to missed study days
    InactivityPenalty { days_missed: u32, deducted: f64 },
}

impl EngineEvent {
    /// Text for the alert banner, if this event warrants one
    pub fn alert_text(&self) -> Option<String> {
        match self {
            EngineEvent::Rejected(reason) => Some(reason.to_string()),
            EngineEvent::InactivityPenalty { days_missed, deducted } => Some(format!(
                "You missed {} day(s). -{} XP deducted.",
                days_missed, deducted
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text() {
        let penalty = EngineEvent::InactivityPenalty { days_missed: 3, deducted: 30.0 };
        assert_eq!(
            penalty.alert_text().as_deref(),
            Some("You missed 3 day(s). -30 XP deducted.")
        );

        let low = EngineEvent::Rejected(Rejection::ScoreTooLow { score: 150 });
        assert_eq!(low.alert_text().as_deref(), Some("Score too low for XP. No XP awarded."));

        assert_eq!(EngineEvent::LevelUp(2).alert_text(), None);
        assert_eq!(EngineEvent::StateChanged.alert_text(), None);
    }
}
