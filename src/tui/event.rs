//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.

use crate::tui::app::App;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore mouse, focus, paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Mount the module under the sidebar cursor.
    Activate,
    /// Clear the selection and unmount the current module.
    Back,
    /// Refresh the mounted module.
    Refresh,
    /// Tear down and re-run the whole render pass.
    ReloadAll,
    /// Collapse or expand the sidebar.
    ToggleSidebar,
}

/// Handles a key event by dispatching to the appropriate app method or
/// action.
///
/// Sidebar navigation mutates the app directly; everything that touches the
/// orchestrator is returned as an [`Action`] for the event loop to spawn.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            Action::None
        }
        KeyCode::Enter => Action::Activate,
        KeyCode::Esc => Action::Back,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('R') => Action::ReloadAll,
        KeyCode::Char('s') => Action::ToggleSidebar,
        _ => Action::None,
    }
}
