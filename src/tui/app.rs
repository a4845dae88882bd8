//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! Orchestrator work (mounting, refreshing) runs on spawned tasks so input
//! handling and drawing never wait on the network.

use crate::config::{Config, ConfigLoader};
use crate::notify::Notifier;
use crate::orchestrator::{Orchestrator, RefreshOutcome};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

/// Fallback tick rate when the configured one does not parse.
const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Core application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Shared orchestrator driving mounts and refreshes.
    pub orchestrator: Arc<Orchestrator>,
    /// Transient notices shown in the notice row.
    pub notifier: Arc<Notifier>,
    /// Loaded configuration (persisted back when presentation flags change).
    pub config: Config,
    /// Sidebar cursor position into the orchestrator's listing.
    pub selected_index: Option<usize>,
    /// Whether the sidebar is collapsed.
    pub sidebar_collapsed: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
}

impl App {
    /// Creates a new App over a shared orchestrator and notifier.
    pub fn new(orchestrator: Arc<Orchestrator>, notifier: Arc<Notifier>, config: Config) -> Self {
        let sidebar_collapsed = config.tui.sidebar_collapsed;
        Self {
            should_quit: false,
            orchestrator,
            notifier,
            config,
            selected_index: None,
            sidebar_collapsed,
            tick_count: 0,
        }
    }

    /// Moves the sidebar cursor down by one, clamped to the last module.
    pub fn select_next(&mut self) {
        let len = self.orchestrator.listing().len();
        if len == 0 {
            return;
        }
        let last = len - 1;
        self.selected_index = Some(self.selected_index.map_or(0, |i| (i + 1).min(last)));
    }

    /// Moves the sidebar cursor up by one, clamped to index 0.
    pub fn select_previous(&mut self) {
        if self.orchestrator.listing().is_empty() {
            return;
        }
        self.selected_index = Some(self.selected_index.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Initializes the cursor to the first module once a listing exists.
    pub fn init_selection(&mut self) {
        if self.selected_index.is_none() && !self.orchestrator.listing().is_empty() {
            self.selected_index = Some(0);
        }
    }

    /// Module id under the sidebar cursor, if any.
    pub fn selected_module_id(&self) -> Option<String> {
        let index = self.selected_index?;
        self.orchestrator.listing().get(index).map(|d| d.id.clone())
    }

    /// Flips the sidebar and persists the flag to the config file.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.config.tui.sidebar_collapsed = self.sidebar_collapsed;
        if let Err(error) = ConfigLoader::save_default(&self.config) {
            tracing::warn!("could not persist sidebar state: {}", error);
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop,
    /// restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).expect("failed to create ratatui terminal instance");
        let tick_rate = crate::config::schema::parse_duration_or(
            &self.config.tui.tick_rate,
            DEFAULT_TICK_RATE,
        );
        let event_handler = EventHandler::new(tick_rate);
        let mut reader = EventStream::new();

        // Populate the listing (and the placeholder view) in the background.
        {
            let orchestrator = Arc::clone(&self.orchestrator);
            tokio::spawn(async move { orchestrator.render_pass().await });
        }

        loop {
            let event = event_handler.next(&mut reader).await?;
            match event {
                Event::Key(key) => match handle_key_event(self, key) {
                    Action::Quit => {
                        self.should_quit = true;
                        return Ok(());
                    }
                    Action::Activate => self.spawn_select(self.selected_module_id()),
                    Action::Back => self.spawn_select(None),
                    Action::Refresh => self.spawn_refresh(),
                    Action::ReloadAll => self.spawn_reload(),
                    Action::ToggleSidebar => self.toggle_sidebar(),
                    Action::None => {}
                },
                Event::Tick => {
                    self.tick_count += 1;
                    self.init_selection();
                }
                Event::Resize(_, _) => {}
            }

            terminal.draw(|frame| {
                ui::draw(frame, self);
            })?;
        }
    }

    /// Sets the Active Filter on a background task.
    fn spawn_select(&self, id: Option<String>) {
        let orchestrator = Arc::clone(&self.orchestrator);
        tokio::spawn(async move { orchestrator.select(id).await });
    }

    /// Refreshes the mounted module on a background task.
    fn spawn_refresh(&self) {
        let orchestrator = Arc::clone(&self.orchestrator);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            match orchestrator.refresh_selected().await {
                RefreshOutcome::Module(id) => notifier.success(format!("Refreshed '{id}'")),
                RefreshOutcome::Reloaded => notifier.success("Dashboard reloaded"),
            }
        });
    }

    /// Re-runs the full render pass on a background task.
    fn spawn_reload(&self) {
        let orchestrator = Arc::clone(&self.orchestrator);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            orchestrator.reload().await;
            notifier.success("Dashboard reloaded");
        });
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}
