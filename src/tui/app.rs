//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, info};

use crate::config::{Config, ConfigStore, Overrides};
use crate::history::EnrichedSnapshot;
use crate::provider::SnapshotProvider;
use crate::theme::Theme;
use crate::view::ViewSettings;

use super::event::KeySource;
use super::input::{KeyAction, handle_key};
use super::render::{RenderContext, render};
use super::state::InteractionState;

/// Granularity of the inter-tick sleep, so an interrupt is noticed early.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Main TUI application.
pub struct App<P: SnapshotProvider, K: KeySource> {
    provider: P,
    keys: K,
    state: InteractionState,
    config: Config,
    store: Option<ConfigStore>,
    theme: Theme,
    settings: ViewSettings,
    interval: Duration,
    interrupted: Arc<AtomicBool>,
    should_quit: bool,
}

impl<P: SnapshotProvider, K: KeySource> App<P, K> {
    /// Creates a new App. Persisted view changes are written to `store`
    /// when one is given.
    pub fn new(provider: P, keys: K, config: Config, store: Option<ConfigStore>, theme: Theme) -> Self {
        Self {
            provider,
            keys,
            state: InteractionState::from_config(&config),
            settings: ViewSettings::from_config(&config),
            interval: config.interval(),
            config,
            store,
            theme,
            interrupted: Arc::new(AtomicBool::new(false)),
            should_quit: false,
        }
    }

    /// Applies run-only settings. They shape the display and cadence but
    /// are not written back to the store.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        let effective = overrides.apply(&self.config);
        self.settings = ViewSettings::from_config(&effective);
        self.interval = effective.interval();
        self
    }

    /// Flag that stops the loop when set, for signal handlers.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current(&self) -> Option<&EnrichedSnapshot> {
        self.provider.current()
    }

    fn stopping(&self) -> bool {
        self.should_quit || self.interrupted.load(Ordering::SeqCst)
    }

    /// Runs the input and sampling half of one tick.
    ///
    /// Returns `false` once the app should stop.
    pub fn step(&mut self) -> io::Result<bool> {
        if self.stopping() {
            return Ok(false);
        }
        if let Some(key) = self.keys.next_key()? {
            let before = self.state.persisted();
            if handle_key(&mut self.state, key, self.config.presets.len()) == KeyAction::Quit {
                self.should_quit = true;
                return Ok(false);
            }
            if self.state.persisted() != before {
                self.persist();
            }
        }
        if !self.state.paused {
            self.provider.advance();
            if let Some(e) = self.provider.last_error() {
                debug!(error = %e, "sampling degraded");
            }
        }
        Ok(!self.stopping())
    }

    fn persist(&mut self) {
        self.state.apply_to(&mut self.config);
        if let Some(store) = &self.store {
            store.save_or_warn(&self.config);
        }
    }

    /// Draws one frame from the cached snapshot.
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let empty = EnrichedSnapshot::default();
        let ctx = RenderContext {
            enriched: self.provider.current().unwrap_or(&empty),
            state: &self.state,
            settings: &self.settings,
            theme: &self.theme,
            presets: &self.config.presets,
            rounded: self.config.rounded_corners,
            now: Local::now(),
        };
        terminal.draw(|frame| render(frame, &ctx))?;
        Ok(())
    }

    /// Runs the TUI application on the real terminal.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let result = Terminal::new(CrosstermBackend::new(stdout))
            .and_then(|mut terminal| {
                let result = self.run_loop(&mut terminal);
                let _ = terminal.show_cursor();
                result
            });

        // Restore terminal
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        info!("terminal restored");
        result
    }

    /// Fixed-cadence loop: step, draw, sleep out the rest of the interval.
    pub fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let interval = self.interval;
        info!(interval_ms = interval.as_millis() as u64, "starting render loop");
        loop {
            let started = Instant::now();
            if !self.step()? {
                break;
            }
            self.draw(terminal)?;
            while started.elapsed() < interval && !self.stopping() {
                std::thread::sleep(SLEEP_SLICE.min(interval.saturating_sub(started.elapsed())));
            }
        }
        info!("render loop stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockSource;
    use crate::config::SortKey;
    use crate::provider::LiveProvider;
    use crate::tui::event::ScriptedKeys;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    type TestApp = App<LiveProvider<MockSource>, ScriptedKeys>;

    fn app(keys: Vec<KeyEvent>, store: Option<ConfigStore>) -> TestApp {
        App::new(
            LiveProvider::new(MockSource::typical()),
            ScriptedKeys::new(keys),
            Config::default(),
            store,
            Theme::default(),
        )
    }

    fn history_len(app: &TestApp) -> usize {
        app.current().map_or(0, |e| e.cpu_history.len())
    }

    #[test]
    fn test_pause_freezes_history() {
        let mut app = app(vec![key('x'), key('p'), key('x'), key('p')], None);
        assert!(app.step().unwrap());
        assert_eq!(history_len(&app), 1);
        app.step().unwrap();
        assert!(app.state().paused);
        assert_eq!(history_len(&app), 1);
        app.step().unwrap();
        assert_eq!(history_len(&app), 1);
        app.step().unwrap();
        assert!(!app.state().paused);
        assert_eq!(history_len(&app), 2);
    }

    #[test]
    fn test_quit_key() {
        let mut app = app(vec![key('q')], None);
        assert!(!app.step().unwrap());
        assert!(!app.step().unwrap());
    }

    #[test]
    fn test_interrupt_flag_stops() {
        let mut app = app(vec![], None);
        assert!(app.step().unwrap());
        app.interrupt_flag().store(true, Ordering::SeqCst);
        assert!(!app.step().unwrap());
    }

    #[test]
    fn test_sort_change_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("sysview.conf"));
        let mut app = app(vec![key('s'), key('p')], Some(store.clone()));
        app.step().unwrap();
        assert_eq!(app.config().proc_sorting, SortKey::Memory);
        assert_eq!(store.load().proc_sorting, SortKey::Memory);

        // Pausing is not persisted.
        std::fs::remove_file(store.path()).unwrap();
        app.step().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_overrides_are_not_saved() {
        use crate::config::GraphSymbol;

        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("sysview.conf"));
        let overrides = Overrides {
            update_ms: Some(5000),
            graph_symbol: Some(GraphSymbol::Tty),
        };
        let mut app = app(vec![key('s')], Some(store.clone())).with_overrides(overrides);
        assert_eq!(app.interval, Duration::from_millis(5000));
        app.step().unwrap();

        let saved = store.load();
        assert_eq!(saved.proc_sorting, SortKey::Memory);
        assert_eq!(saved.update_ms, 1500);
        assert_eq!(saved.graph_symbol, GraphSymbol::Braille);
    }

    #[test]
    fn test_run_loop_draws_until_quit() {
        let config = Config {
            update_ms: 100,
            ..Config::default()
        };
        let mut app = App::new(
            LiveProvider::new(MockSource::typical()),
            ScriptedKeys::new(vec![key('x'), key('q')]),
            config,
            None,
            Theme::default(),
        );
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        app.run_loop(&mut terminal).unwrap();
        assert_eq!(history_len(&app), 1);
        let buffer = terminal.backend().buffer();
        let first_row: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(first_row.starts_with("SysView - testhost"));
    }
}
