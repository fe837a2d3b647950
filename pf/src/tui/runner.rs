//! TUI Runner - main loop that owns the terminal and the timers
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App for handling
//! - Executing pending actions the App queued
//! - Delivering copied-indicator resets back onto the UI loop
//! - Rendering on every event (tick rate ~30 FPS by default)

use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views;
use crate::composer::Composer;

/// Messages from background timers back to the UI loop
#[derive(Debug, PartialEq, Eq)]
enum TimerMessage {
    ResetCopied,
}

impl TimerMessage {
    fn apply(self, composer: &mut Composer) {
        debug!(?self, "TimerMessage::apply: called");
        match self {
            Self::ResetCopied => composer.reset_copied(),
        }
    }
}

/// One-shot timers that turn the copied indicator back off
///
/// Each copy schedules its own reset and nothing is ever cancelled, so an
/// earlier timer may clear a later copy early.
struct CopiedResets {
    tx: mpsc::UnboundedSender<TimerMessage>,
    rx: mpsc::UnboundedReceiver<TimerMessage>,
    delay: Duration,
}

impl CopiedResets {
    fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, delay }
    }

    fn schedule(&self) {
        debug!(delay = ?self.delay, "CopiedResets::schedule: called");
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerMessage::ResetCopied);
        });
    }

    async fn next(&mut self) -> Option<TimerMessage> {
        self.rx.recv().await
    }
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    event_handler: EventHandler,
    copied_resets: CopiedResets,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, tick_rate: Duration, copied_indicator: Duration) -> Self {
        debug!(?tick_rate, ?copied_indicator, "TuiRunner::new: called");
        Self {
            app,
            terminal,
            event_handler: EventHandler::new(tick_rate),
            copied_resets: CopiedResets::new(copied_indicator),
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        info!("TUI started");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Key(key) => {
                            if self.app.handle_key(key) {
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                        Event::Tick => {}
                    }
                }
                Some(message) = self.copied_resets.next() => {
                    message.apply(self.app.composer_mut());
                }
            }

            if let Some(action) = self.app.state_mut().pending_action.take() {
                self.execute_action(action);
            }

            if self.app.state().should_quit {
                break;
            }
        }
        info!("TUI exiting");
        Ok(())
    }

    fn execute_action(&mut self, action: PendingAction) {
        debug!(?action, "TuiRunner::execute_action: called");
        match action {
            PendingAction::ScheduleCopiedReset => self.copied_resets.schedule(),
        }
    }
}
