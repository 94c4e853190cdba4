//! Main UI Application
//!
//! Dashboard rendering and form input for the progress engine.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::data::{DrillScoring, ScoringRules};
use crate::engine::{EngineEvent, ProgressEngine};
use crate::progression::{ActivityKind, EventInput, level_title};
use crate::save::ProgressStore;

use super::banner::Banners;
use super::theme::Theme;

/// Longest text accepted in a single form field
const MAX_FIELD_LEN: usize = 16;

/// Longest display name accepted
const MAX_NAME_LEN: usize = 32;

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// First run, asking for a display name
    NamePrompt,
    Dashboard,
    /// Waiting for y/n before wiping progress
    ConfirmReset,
}

/// Entry form for one kind of study event
#[derive(Debug, Clone)]
struct EventForm {
    kind: ActivityKind,
    /// Date first, then the kind's own fields
    values: Vec<String>,
}

impl EventForm {
    fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            values: vec![String::new(); Self::labels(kind).len()],
        }
    }

    fn labels(kind: ActivityKind) -> &'static [&'static str] {
        match kind {
            ActivityKind::Test => &["Date", "Score"],
            ActivityKind::Drill => &["Date", "Hours"],
            ActivityKind::Section => &["Date", "Right", "Wrong"],
        }
    }

    fn date(&self) -> &str {
        &self.values[0]
    }

    fn input(&self) -> EventInput {
        match self.kind {
            ActivityKind::Test => EventInput::test(self.values[1].as_str()),
            ActivityKind::Drill => EventInput::drill(self.values[1].as_str()),
            ActivityKind::Section => EventInput::section(self.values[1].as_str(), self.values[2].as_str()),
        }
    }

    fn clear(&mut self) {
        self.values.iter_mut().for_each(String::clear);
    }
}

/// Main UI application
pub struct App {
    screen: Screen,
    /// Name being typed on the prompt
    name_input: String,
    /// One form per event kind, in tab order
    forms: Vec<EventForm>,
    /// Selected form tab
    form_tab: usize,
    /// Focused field in the selected form
    field_cursor: usize,
    /// Records list scroll offset
    records_scroll: usize,
    banners: Banners,
}

impl App {
    /// Create the UI, starting on the name prompt if no name is set yet
    pub fn new(needs_name: bool) -> Self {
        Self {
            screen: if needs_name { Screen::NamePrompt } else { Screen::Dashboard },
            name_input: String::new(),
            forms: ActivityKind::ALL.iter().map(|&k| EventForm::new(k)).collect(),
            form_tab: 0,
            field_cursor: 0,
            records_scroll: 0,
            banners: Banners::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn banners(&self) -> &Banners {
        &self.banners
    }

    /// Kind of the selected form
    pub fn selected_kind(&self) -> ActivityKind {
        self.forms[self.form_tab].kind
    }

    /// Advance banner timers
    pub fn tick(&mut self, now: Instant) {
        self.banners.tick(now);
    }

    /// Turn engine notifications into banners
    pub fn absorb_events(&mut self, events: Vec<EngineEvent>, now: Instant) {
        for event in events {
            match &event {
                EngineEvent::LevelUp(level) => self.banners.show_level_up(*level, now),
                EngineEvent::ThemeChanged(level) => {
                    log::info!("Theme switched to {}", Theme::for_level(*level).name);
                }
                _ => {}
            }
            if let Some(text) = event.alert_text() {
                self.banners.show_alert(text, now);
            }
        }
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input<S: ProgressStore>(&mut self, key: KeyEvent, engine: &mut ProgressEngine<S>) -> bool {
        // Global quit shortcut
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            return true;
        }

        let quit = match self.screen {
            Screen::NamePrompt => self.handle_name_input(key, engine),
            Screen::Dashboard => self.handle_dashboard_input(key, engine),
            Screen::ConfirmReset => {
                self.handle_reset_confirm(key, engine);
                false
            }
        };

        self.absorb_events(engine.drain_events(), Instant::now());
        quit
    }

    fn handle_name_input<S: ProgressStore>(&mut self, key: KeyEvent, engine: &mut ProgressEngine<S>) -> bool {
        match key.code {
            KeyCode::Enter => {
                if engine.set_display_name(&self.name_input) {
                    log::info!("Display name set to {}", engine.display_name());
                    self.screen = Screen::Dashboard;
                }
            }
            // Skip for now, keep the placeholder
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) if !c.is_control() && self.name_input.chars().count() < MAX_NAME_LEN => {
                self.name_input.push(c);
            }
            _ => {}
        }
        false
    }

    fn handle_dashboard_input<S: ProgressStore>(&mut self, key: KeyEvent, engine: &mut ProgressEngine<S>) -> bool {
        let field_count = self.forms[self.form_tab].values.len();

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Left => self.select_form((self.form_tab + self.forms.len() - 1) % self.forms.len()),
            KeyCode::Right => self.select_form((self.form_tab + 1) % self.forms.len()),
            KeyCode::F(n @ 1..=3) => self.select_form(n as usize - 1),
            KeyCode::Tab | KeyCode::Down => self.field_cursor = (self.field_cursor + 1) % field_count,
            KeyCode::BackTab | KeyCode::Up => {
                self.field_cursor = (self.field_cursor + field_count - 1) % field_count;
            }
            KeyCode::PageDown => {
                let max = engine.activity_log().len().saturating_sub(1);
                self.records_scroll = (self.records_scroll + 5).min(max);
            }
            KeyCode::PageUp => self.records_scroll = self.records_scroll.saturating_sub(5),
            KeyCode::Enter => self.submit(engine),
            KeyCode::Backspace => {
                self.forms[self.form_tab].values[self.field_cursor].pop();
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let today = chrono::Local::now().date_naive();
                self.forms[self.form_tab].values[0] = today.format("%Y-%m-%d").to_string();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.screen = Screen::ConfirmReset;
            }
            KeyCode::Char(c) if !c.is_control() && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let value = &mut self.forms[self.form_tab].values[self.field_cursor];
                if value.chars().count() < MAX_FIELD_LEN {
                    value.push(c);
                }
            }
            _ => {}
        }
        false
    }

    /// Only an explicit 'y' wipes progress, anything else backs out
    fn handle_reset_confirm<S: ProgressStore>(&mut self, key: KeyEvent, engine: &mut ProgressEngine<S>) {
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            engine.reset();
            self.forms.iter_mut().for_each(EventForm::clear);
            self.field_cursor = 0;
            self.records_scroll = 0;
        } else {
            log::info!("Reset cancelled");
        }
        self.screen = Screen::Dashboard;
    }

    fn select_form(&mut self, tab: usize) {
        self.form_tab = tab;
        self.field_cursor = 0;
    }

    /// Send the selected form to the engine, clearing it if accepted
    fn submit<S: ProgressStore>(&mut self, engine: &mut ProgressEngine<S>) {
        let form = &mut self.forms[self.form_tab];
        if engine.record_event(form.date(), &form.input()).is_ok() {
            form.clear();
            self.field_cursor = 0;
            self.records_scroll = 0;
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render<S: ProgressStore>(&self, frame: &mut Frame, engine: &ProgressEngine<S>) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        let theme = Theme::for_level(engine.current_theme_level());

        self.render_dashboard(frame, engine, &theme);

        if let Some((level, _)) = self.banners.level_up() {
            self.render_level_up(frame, level, &theme);
        }
        if let Some(alert) = self.banners.alert() {
            self.render_alert(frame, &alert.text);
        }
        match self.screen {
            Screen::NamePrompt => self.render_name_prompt(frame, &theme),
            Screen::ConfirmReset => self.render_reset_confirm(frame),
            Screen::Dashboard => {}
        }
    }

    fn render_dashboard<S: ProgressStore>(&self, frame: &mut Frame, engine: &ProgressEngine<S>, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, engine, theme, chunks[0]);
        self.render_progress(frame, engine, theme, chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        self.render_forms(frame, engine.rules(), theme, body[0]);
        self.render_records(frame, engine, theme, body[1]);

        let help = Paragraph::new(
            "←/→ form  Tab field  Enter log  Ctrl+T today  Ctrl+R reset  PgUp/PgDn records  Esc quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn render_header<S: ProgressStore>(&self, frame: &mut Frame, engine: &ProgressEngine<S>, theme: &Theme, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" LSAT Solo Leveling ", theme.title_style()))
            .border_style(theme.border_style());

        let level = engine.current_level();
        let line = Line::from(vec![
            Span::styled(
                truncate_name(engine.display_name(), MAX_NAME_LEN),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("Level {}", level), Style::default().fg(theme.accent)),
            Span::raw("  "),
            Span::styled(level_title(level), Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)),
            Span::raw("  "),
            Span::styled(format!("[{} theme]", theme.name), Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_progress<S: ProgressStore>(&self, frame: &mut Frame, engine: &ProgressEngine<S>, theme: &Theme, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" XP ")
            .border_style(theme.border_style());

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(theme.bar).bg(Color::Black))
            .ratio(engine.progress_fraction())
            .label(format!("{} / {}", format_xp(engine.current_xp()), format_xp(engine.xp_needed_for_next())));

        frame.render_widget(gauge, area);
    }

    fn render_forms(&self, frame: &mut Frame, rules: &ScoringRules, theme: &Theme, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Log Study ")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let titles: Vec<Line> = self
            .forms
            .iter()
            .enumerate()
            .map(|(i, form)| Line::from(format!("F{} {}", i + 1, form.kind.name())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.form_tab)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(theme.title_style().add_modifier(Modifier::UNDERLINED));
        frame.render_widget(tabs, chunks[0]);

        let form = &self.forms[self.form_tab];
        let mut lines: Vec<Line> = EventForm::labels(form.kind)
            .iter()
            .zip(&form.values)
            .enumerate()
            .map(|(i, (label, value))| {
                let focused = i == self.field_cursor;
                let marker = if focused { "> " } else { "  " };
                let value_style = if focused {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let shown = if value.is_empty() && focused { "_".to_string() } else { value.clone() };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(format!("{:<6}", label), Style::default().fg(Color::Gray)),
                    Span::styled(shown, value_style),
                ])
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            xp_hint(form.kind, rules),
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn render_records<S: ProgressStore>(&self, frame: &mut Frame, engine: &ProgressEngine<S>, theme: &Theme, area: Rect) {
        let records = engine.activity_log();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Records ({}) ", records.len()))
            .border_style(theme.border_style());

        if records.is_empty() {
            let empty = Paragraph::new("No records yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = records
            .iter()
            .skip(self.records_scroll)
            .map(|record| {
                let color = match record.kind {
                    ActivityKind::Test => Color::Yellow,
                    ActivityKind::Drill => Color::Green,
                    ActivityKind::Section => Color::Cyan,
                };
                ListItem::new(Line::from(Span::styled(record.summary(), Style::default().fg(color))))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_level_up(&self, frame: &mut Frame, level: u32, theme: &Theme) {
        let area = centered_rect(40, 20, frame.area());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "LEVEL UP!",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{}", level),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(level_title(level), Style::default().fg(Color::Gray))),
        ];

        let popup = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.accent)));
        frame.render_widget(popup, area);
    }

    fn render_alert(&self, frame: &mut Frame, text: &str) {
        let full = frame.area();
        let height = 3.min(full.height);
        let area = Rect {
            x: full.x + 2,
            y: full.y + full.height.saturating_sub(height + 1),
            width: full.width.saturating_sub(4),
            height,
        };
        frame.render_widget(Clear, area);

        let alert = Paragraph::new(text.to_string())
            .style(Style::default().fg(Color::LightRed))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Alert ")
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(alert, area);
    }

    fn render_name_prompt(&self, frame: &mut Frame, theme: &Theme) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(""),
            Line::from("Enter your name for LSAT Solo Leveling:"),
            Line::from(""),
            Line::from(Span::styled(
                format!("{}_", self.name_input),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("[Enter] Confirm  [Esc] Skip", Style::default().fg(Color::DarkGray))),
        ];

        let prompt = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Welcome ")
                    .border_style(theme.border_style()),
            );
        frame.render_widget(prompt, area);
    }

    fn render_reset_confirm(&self, frame: &mut Frame) {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Reset all progress?",
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            )),
            Line::from("Level, XP and records will be erased."),
            Line::from(""),
            Line::from(Span::styled("[y] Reset  [any other key] Cancel", Style::default().fg(Color::DarkGray))),
        ];

        let popup = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Reset ")
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(popup, area);
    }
}

/// One-line reminder of how a form is scored
fn xp_hint(kind: ActivityKind, rules: &ScoringRules) -> String {
    match kind {
        ActivityKind::Test => format!(
            "{}-{}: {} XP, {}+: {} XP",
            rules.test_mid_threshold + 1,
            rules.test_high_threshold,
            rules.test_mid_xp,
            rules.test_high_threshold + 1,
            rules.test_high_xp
        ),
        ActivityKind::Drill => match rules.drill_scoring {
            DrillScoring::PerHour(rate) => format!("{} XP per hour drilled", rate),
            DrillScoring::Flat(xp) => format!("{} XP per drill", xp),
        },
        ActivityKind::Section => format!("{} XP per section logged", rules.section_xp),
    }
}

/// XP with at most two decimals, trailing zeros dropped
fn format_xp(xp: f64) -> String {
    let fixed = format!("{:.2}", xp);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
