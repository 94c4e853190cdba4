//! Experience and leveling
//!
//! XP curve, level cap, theme milestones, and rank titles.

/// Highest reachable level. XP earned past the last threshold is kept.
pub const MAX_LEVEL: u32 = 100;

/// Levels that unlock a new dashboard theme
pub const MILESTONES: [u32; 8] = [1, 5, 10, 20, 40, 60, 80, 100];

/// XP needed to advance from `level` to `level + 1`
pub fn xp_needed(level: u32) -> f64 {
    // Base 100 XP at level 0, +50 per level after
    100.0 + level as f64 * 50.0
}

/// Whether reaching `level` changes the theme
pub fn is_milestone(level: u32) -> bool {
    MILESTONES.contains(&level)
}

/// Get a rank title based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0 => "Unranked",
        1..=4 => "E-Rank Hunter",
        5..=9 => "D-Rank Hunter",
        10..=19 => "C-Rank Hunter",
        20..=39 => "B-Rank Hunter",
        40..=59 => "A-Rank Hunter",
        60..=79 => "S-Rank Hunter",
        80..=99 => "National Level Hunter",
        _ => "Shadow Monarch",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_needed() {
        assert_eq!(xp_needed(0), 100.0);
        assert_eq!(xp_needed(1), 150.0);
        assert_eq!(xp_needed(4), 300.0);
        assert_eq!(xp_needed(100), 5100.0);
    }

    #[test]
    fn test_xp_needed_strictly_increasing() {
        for level in 0..MAX_LEVEL {
            assert!(xp_needed(level + 1) > xp_needed(level));
            assert_eq!(xp_needed(level), 100.0 + 50.0 * level as f64);
        }
    }

    #[test]
    fn test_milestones() {
        assert!(is_milestone(1));
        assert!(is_milestone(100));
        assert!(!is_milestone(0));
        assert!(!is_milestone(2));
        assert!(!is_milestone(99));
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(0), "Unranked");
        assert_eq!(level_title(5), "D-Rank Hunter");
        assert_eq!(level_title(100), "Shadow Monarch");
    }
}
