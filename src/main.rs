//! LSAT Leveling - Entry Point
//!
//! Initializes logging and the terminal, restores progress, applies the
//! inactivity penalty once, and runs the dashboard loop.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use lsat_leveling::config::AppPaths;
use lsat_leveling::data::{export_default_rules, ScoringRules, RULES_FILE};
use lsat_leveling::engine::ProgressEngine;
use lsat_leveling::save::{JsonFileStore, DEFAULT_SLOT};
use lsat_leveling::ui::App;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let paths = AppPaths::resolve();

    // Initialize logging to file (to avoid interfering with TUI)
    let log_target: Box<dyn Write + Send> = match fs::create_dir_all(&paths.data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(paths.log_path())
    }) {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(log_target))
    .init();

    log::info!("Starting LSAT Leveling v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Data in {:?}, config in {:?}", paths.data_dir, paths.config_dir);

    // First run: leave an editable copy of the defaults behind
    if !paths.config_dir.join(RULES_FILE).exists() {
        match export_default_rules(&paths.config_dir) {
            Ok(()) => log::info!("Wrote default {} to {:?}", RULES_FILE, paths.config_dir),
            Err(e) => log::warn!("Could not write default rules: {}", e),
        }
    }
    let rules = ScoringRules::load_from(&paths.config_dir);
    let store = JsonFileStore::new(&paths.data_dir, DEFAULT_SLOT);
    let mut engine = ProgressEngine::load(store, rules);

    // Once per session, before anything else is logged
    engine.apply_inactivity_penalty();

    let mut app = App::new(engine.needs_display_name());
    app.absorb_events(engine.drain_events(), Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &mut engine);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("LSAT Leveling shut down cleanly");
    result
}

/// Main dashboard loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    engine: &mut ProgressEngine<JsonFileStore>,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            app.render(frame, engine);
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press && app.handle_input(key, engine) {
                    break;
                }
            }
        }
    }

    Ok(())
}
