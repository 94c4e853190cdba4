//! Study event validation and scoring
//!
//! Turns the raw form fields of a logged study event into a scored event,
//! or explains why it was turned down.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::ScoringRules;

/// Date format accepted from the forms
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lowest and highest possible LSAT scores
pub const MIN_SCORE: i64 = 120;
pub const MAX_SCORE: i64 = 180;

/// Kinds of loggable study events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Test,
    Drill,
    Section,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [ActivityKind::Test, ActivityKind::Drill, ActivityKind::Section];

    pub fn name(&self) -> &'static str {
        match self {
            ActivityKind::Test => "Practice Test",
            ActivityKind::Drill => "Drill",
            ActivityKind::Section => "Practice Section",
        }
    }

    /// Short tag used in the records list
    pub fn tag(&self) -> &'static str {
        match self {
            ActivityKind::Test => "TEST",
            ActivityKind::Drill => "DRILL",
            ActivityKind::Section => "SECTION",
        }
    }

    /// Alert text shown when the form for this kind is filled in wrong
    pub fn invalid_hint(&self) -> &'static str {
        match self {
            ActivityKind::Test => "Please enter a valid date and LSAT score (120-180).",
            ActivityKind::Drill => "Please enter a valid date and hours.",
            ActivityKind::Section => "Please enter a valid date and number of questions.",
        }
    }
}

/// Raw field values for one study event, as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub enum EventInput {
    Test { score: String },
    Drill { hours: String },
    Section { right: String, wrong: String },
}

impl EventInput {
    pub fn test(score: impl Into<String>) -> Self {
        EventInput::Test { score: score.into() }
    }

    pub fn drill(hours: impl Into<String>) -> Self {
        EventInput::Drill { hours: hours.into() }
    }

    pub fn section(right: impl Into<String>, wrong: impl Into<String>) -> Self {
        EventInput::Section { right: right.into(), wrong: wrong.into() }
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            EventInput::Test { .. } => ActivityKind::Test,
            EventInput::Drill { .. } => ActivityKind::Drill,
            EventInput::Section { .. } => ActivityKind::Section,
        }
    }
}

/// Malformed or out-of-range input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("date is required")]
    MissingDate,

    #[error("'{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("score {0} is outside 120-180")]
    ScoreOutOfRange(i64),

    #[error("hours must be greater than zero")]
    NonPositiveHours,

    #[error("{0} cannot be negative")]
    NegativeCount(&'static str),

    #[error("XP award is too large to track")]
    XpOutOfRange,
}

/// Why a study event earned nothing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The form was filled in wrong
    #[error("{} ({})", .kind.invalid_hint(), .source)]
    Invalid {
        kind: ActivityKind,
        source: ValidationError,
    },

    /// Well-formed test, but the score is below the XP table
    #[error("Score too low for XP. No XP awarded.")]
    ScoreTooLow { score: u32 },
}

impl Rejection {
    /// True for malformed input, false when the input was fine but earned nothing
    pub fn is_validation(&self) -> bool {
        matches!(self, Rejection::Invalid { .. })
    }
}

/// A validated, scored study event ready to be logged
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEvent {
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub details: String,
    pub xp: f64,
}

/// Parse a form date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    raw.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

/// Whole score, dropping any fractional part the way the web form did
fn parse_score(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    match parse_integer("score", trimmed) {
        Ok(score) => Ok(score),
        Err(ValidationError::NotANumber { .. }) => trimmed
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            // Saturating cast, anything huge fails the range check
            .map(|s| s.trunc() as i64)
            .ok_or_else(|| ValidationError::NotANumber {
                field: "score",
                value: trimmed.to_string(),
            }),
        Err(e) => Err(e),
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let value = parse_integer(field, raw)?;
    if value < 0 {
        return Err(ValidationError::NegativeCount(field));
    }
    u32::try_from(value).map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.trim().to_string(),
    })
}

fn parse_hours(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("hours"));
    }
    let hours = raw
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field: "hours",
            value: raw.to_string(),
        })?;
    if hours <= 0.0 {
        return Err(ValidationError::NonPositiveHours);
    }
    Ok(hours)
}

/// Validate and score one study event
pub fn score_event(date: &str, input: &EventInput, rules: &ScoringRules) -> Result<ScoredEvent, Rejection> {
    let kind = input.kind();
    let invalid = |source| Rejection::Invalid { kind, source };

    let date = parse_date(date).map_err(invalid)?;

    match input {
        EventInput::Test { score } => {
            let score = parse_score(score).map_err(invalid)?;
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(invalid(ValidationError::ScoreOutOfRange(score)));
            }
            // In range, so it fits
            let score = score as u32;
            let xp = rules.test_xp(score);
            if xp <= 0.0 {
                return Err(Rejection::ScoreTooLow { score });
            }
            Ok(ScoredEvent {
                kind,
                date,
                details: format!("Score: {}", score),
                xp,
            })
        }
        EventInput::Drill { hours } => {
            let hours = parse_hours(hours).map_err(invalid)?;
            let xp = rules.drill_scoring.xp_for(hours);
            if !xp.is_finite() {
                return Err(invalid(ValidationError::XpOutOfRange));
            }
            Ok(ScoredEvent {
                kind,
                date,
                details: format!("Hours: {}", hours),
                xp,
            })
        }
        EventInput::Section { right, wrong } => {
            let right = parse_count("right", right).map_err(invalid)?;
            let wrong = parse_count("wrong", wrong).map_err(invalid)?;
            Ok(ScoredEvent {
                kind,
                date,
                details: format!("Right: {}, Wrong: {}", right, wrong),
                xp: rules.section_xp,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DrillScoring;

    fn score(date: &str, input: EventInput) -> Result<ScoredEvent, Rejection> {
        score_event(date, &input, &ScoringRules::default())
    }

    #[test]
    fn test_high_score_earns_five() {
        let event = score("2024-01-01", EventInput::test("172")).unwrap();
        assert_eq!(event.kind, ActivityKind::Test);
        assert_eq!(event.xp, 5.0);
        assert_eq!(event.details, "Score: 172");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_mid_score_earns_three() {
        assert_eq!(score("2024-01-01", EventInput::test("170")).unwrap().xp, 3.0);
        assert_eq!(score("2024-01-01", EventInput::test("166")).unwrap().xp, 3.0);
    }

    #[test]
    fn test_low_score_is_not_a_validation_error() {
        let rejection = score("2024-01-01", EventInput::test("160")).unwrap_err();
        assert_eq!(rejection, Rejection::ScoreTooLow { score: 160 });
        assert!(!rejection.is_validation());
        assert!(rejection.to_string().contains("too low"));

        let boundary = score("2024-01-01", EventInput::test("165")).unwrap_err();
        assert_eq!(boundary, Rejection::ScoreTooLow { score: 165 });
    }

    #[test]
    fn test_score_out_of_range() {
        for raw in ["119", "181", "-3"] {
            let rejection = score("2024-01-01", EventInput::test(raw)).unwrap_err();
            assert!(rejection.is_validation(), "{} should be invalid", raw);
        }
        let rejection = score("2024-01-01", EventInput::test("200")).unwrap_err();
        assert_eq!(
            rejection,
            Rejection::Invalid {
                kind: ActivityKind::Test,
                source: ValidationError::ScoreOutOfRange(200),
            }
        );
    }

    #[test]
    fn test_non_numeric_score() {
        let rejection = score("2024-01-01", EventInput::test("abc")).unwrap_err();
        assert!(matches!(
            rejection,
            Rejection::Invalid { source: ValidationError::NotANumber { field: "score", .. }, .. }
        ));
        assert!(rejection.to_string().starts_with("Please enter a valid date and LSAT score"));
    }

    #[test]
    fn test_missing_or_bad_date() {
        let missing = score("", EventInput::test("175")).unwrap_err();
        assert_eq!(
            missing,
            Rejection::Invalid { kind: ActivityKind::Test, source: ValidationError::MissingDate }
        );

        let bad = score("01/02/2024", EventInput::drill("1")).unwrap_err();
        assert!(matches!(
            bad,
            Rejection::Invalid { kind: ActivityKind::Drill, source: ValidationError::InvalidDate(_) }
        ));
    }

    #[test]
    fn test_drill_is_proportional() {
        let event = score("2024-02-01", EventInput::drill("2.5")).unwrap();
        assert_eq!(event.xp, 12.5);
        assert_eq!(event.details, "Hours: 2.5");

        let whole = score("2024-02-01", EventInput::drill("2")).unwrap();
        assert_eq!(whole.details, "Hours: 2");
    }

    #[test]
    fn test_decimal_score_is_truncated() {
        let event = score("2024-01-01", EventInput::test("172.5")).unwrap();
        assert_eq!(event.details, "Score: 172");
        assert_eq!(event.xp, 5.0);

        let low = score("2024-01-01", EventInput::test("165.9")).unwrap_err();
        assert_eq!(low, Rejection::ScoreTooLow { score: 165 });
        assert!(score("2024-01-01", EventInput::test("1e300")).unwrap_err().is_validation());
        assert!(score("2024-01-01", EventInput::test("17x")).unwrap_err().is_validation());
    }

    #[test]
    fn test_drill_xp_overflow_rejected() {
        let rejection = score("2024-02-01", EventInput::drill("1e308")).unwrap_err();
        assert_eq!(
            rejection,
            Rejection::Invalid {
                kind: ActivityKind::Drill,
                source: ValidationError::XpOutOfRange,
            }
        );

        // Large but representable awards still go through
        let big = score("2024-02-01", EventInput::drill("1e300")).unwrap();
        assert!(big.xp.is_finite());
    }

    #[test]
    fn test_drill_flat_rules() {
        let rules = ScoringRules {
            drill_scoring: DrillScoring::Flat(5.0),
            ..ScoringRules::default()
        };
        let event = score_event("2024-02-01", &EventInput::drill("3"), &rules).unwrap();
        assert_eq!(event.xp, 5.0);
    }

    #[test]
    fn test_drill_rejects_bad_hours() {
        for raw in ["0", "-1", "", "lots", "NaN", "inf"] {
            let rejection = score("2024-02-01", EventInput::drill(raw)).unwrap_err();
            assert!(rejection.is_validation(), "{:?} should be invalid", raw);
        }
    }

    #[test]
    fn test_section_is_flat() {
        let event = score("2024-03-01", EventInput::section("20", "5")).unwrap();
        assert_eq!(event.xp, 5.0);
        assert_eq!(event.details, "Right: 20, Wrong: 5");

        let empty = score("2024-03-01", EventInput::section("0", "0")).unwrap();
        assert_eq!(empty.xp, 5.0);
    }

    #[test]
    fn test_section_rejects_bad_counts() {
        let negative = score("2024-03-01", EventInput::section("-1", "3")).unwrap_err();
        assert_eq!(
            negative,
            Rejection::Invalid {
                kind: ActivityKind::Section,
                source: ValidationError::NegativeCount("right"),
            }
        );
        assert!(score("2024-03-01", EventInput::section("4", "")).is_err());
        assert!(score("2024-03-01", EventInput::section("4", "x")).is_err());
        assert!(score("2024-03-01", EventInput::section("4.5", "1")).is_err());
    }
}
