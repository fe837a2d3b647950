//! Terminal User Interface for PromptForge
//!
//! A single-screen composer:
//! - Five form sections with a live preview
//! - Expert role picker, templates, saved prompts and tips
//! - Vim-style navigation and a `:` command mode

mod app;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, InteractionMode, View};

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::composer::Composer;
use crate::config::Config;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI on a fresh tokio runtime until the user quits
pub fn run_blocking(composer: Composer, config: &Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let terminal = init()?;

    // Restore the terminal even on early return or panic unwinding
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let app = App::new(composer).with_export_dir(config.export.dir.clone());
    rt.block_on(async {
        let mut runner = TuiRunner::new(terminal, app, config.ui.tick_rate(), config.ui.copied_indicator());
        runner.run().await
    })
}
