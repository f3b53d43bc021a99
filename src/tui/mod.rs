//! Interactive terminal board.

pub mod board;

use std::io::{self, Stdout};
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::TasklistError;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::view::Ticker;

pub use board::{BoardApp, Mode};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Raw mode plus alternate screen, restored when dropped.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self, TasklistError> {
        enable_raw_mode().map_err(term_err)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(term_err(e));
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(term_err(e))
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(error = %e, "failed to leave alternate screen");
        }
        let _ = self.terminal.show_cursor();
    }
}

fn term_err(e: io::Error) -> TasklistError {
    TasklistError::terminal(e.to_string())
}

/// Open the session, start the clock, take over the terminal and run until
/// the user quits. Clock and terminal are released on every exit path.
pub fn run(config: &Config) -> Result<(), TasklistError> {
    let session = Session::open_durable(config)?;
    let ticker = Ticker::spawn(config.tick_interval())?;
    let mut guard = TerminalGuard::enter()?;
    info!(tasks = session.tasks().len(), "board started");

    let mut app = BoardApp::new(session, Local::now());
    let result = run_event_loop(&mut guard.terminal, &mut app, &ticker);

    drop(guard);
    drop(ticker);
    info!("board closed");
    result
}

fn run_event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut BoardApp<S>,
    ticker: &Ticker,
) -> Result<(), TasklistError> {
    while !app.should_quit() {
        if let Some(now) = ticker.latest() {
            app.on_tick(now);
        }
        terminal.draw(|frame| app.draw(frame)).map_err(term_err)?;

        if event::poll(POLL_INTERVAL).map_err(term_err)? {
            if let Event::Key(key) = event::read().map_err(term_err)? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key)?;
            }
        }
    }
    Ok(())
}
