//! Milestone themes
//!
//! Each milestone level unlocks a palette for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use crate::progression::is_milestone;

/// Dashboard palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// Titles, highlights, focused field
    pub accent: Color,
    /// Progress bar fill
    pub bar: Color,
    pub border: Color,
    pub bold_titles: bool,
}

impl Theme {
    /// Palette for a theme level. Anything that is not a milestone gets the base theme.
    pub fn for_level(theme_level: u32) -> Self {
        if !is_milestone(theme_level) {
            return Self::base();
        }
        match theme_level {
            1 => Self::new("Awakened", Color::Cyan, Color::Cyan, Color::Gray),
            5 => Self::new("Iron", Color::LightBlue, Color::Blue, Color::Gray),
            10 => Self::new("Bronze", Color::Rgb(205, 127, 50), Color::Rgb(160, 95, 35), Color::Rgb(120, 90, 60)),
            20 => Self::new("Silver", Color::Rgb(210, 210, 220), Color::Rgb(160, 160, 175), Color::Rgb(110, 110, 120)),
            40 => Self::new("Gold", Color::Rgb(255, 215, 0), Color::Rgb(210, 170, 0), Color::Rgb(150, 120, 40)),
            60 => Self::new("Crimson", Color::Rgb(220, 60, 80), Color::Rgb(180, 30, 50), Color::Rgb(120, 40, 50)),
            80 => Self::new("Violet", Color::Rgb(170, 100, 240), Color::Rgb(130, 70, 200), Color::Rgb(90, 60, 130)),
            _ => Self {
                bold_titles: true,
                ..Self::new("Monarch", Color::Rgb(120, 90, 255), Color::Rgb(70, 40, 220), Color::Rgb(60, 50, 120))
            },
        }
    }

    /// Theme before any milestone
    pub fn base() -> Self {
        Self::new("Unawakened", Color::White, Color::DarkGray, Color::DarkGray)
    }

    fn new(name: &'static str, accent: Color, bar: Color, border: Color) -> Self {
        Self {
            name,
            accent,
            bar,
            border,
            bold_titles: false,
        }
    }

    pub fn title_style(&self) -> Style {
        let style = Style::default().fg(self.accent);
        if self.bold_titles {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::MILESTONES;

    #[test]
    fn test_every_milestone_has_its_own_theme() {
        let mut names: Vec<_> = MILESTONES.iter().map(|&l| Theme::for_level(l).name).collect();
        names.push(Theme::base().name);
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        assert_eq!(Theme::for_level(0), Theme::base());
        assert_eq!(Theme::for_level(7), Theme::base());
        assert_eq!(Theme::for_level(1000), Theme::base());
    }

    #[test]
    fn test_monarch_is_bold() {
        assert!(Theme::for_level(100).bold_titles);
        assert!(!Theme::for_level(40).bold_titles);
    }
}
