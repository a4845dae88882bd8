//! Shared test utilities for TUI testing with ratatui TestBackend.

#![cfg(test)]

use crate::client::testing::StubSource;
use crate::client::DataSource;
use crate::config::Config;
use crate::notify::Notifier;
use crate::orchestrator::Orchestrator;
use crate::registry::ModuleRegistry;
use crate::tui::app::App;
use crate::tui::ui;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use serde_json::json;
use std::sync::Arc;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    for row in 0..area.height {
        if row_contains(buffer, row, text) {
            return Some(row);
        }
    }
    None
}

/// Draws the app once into a TestBackend buffer.
pub fn render_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| ui::draw(frame, app))
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

/// Builds an app over a scripted two-module server with a fetched listing.
pub async fn test_app() -> App {
    let source: Arc<dyn DataSource> = Arc::new(
        StubSource::new()
            .route(
                "/api/modules",
                json!([
                    {
                        "id": "alpha",
                        "name": "Alpha",
                        "icon": "a",
                        "color": "#667eea",
                        "endpoint": "/api/alpha",
                        "description": "first test module",
                        "refresh_interval_ms": 0
                    },
                    {
                        "id": "beta",
                        "name": "Beta",
                        "icon": "b",
                        "color": "#ff9a9e",
                        "endpoint": "/api/beta",
                        "description": "second test module",
                        "refresh_interval_ms": 0
                    }
                ]),
            )
            .route("/api/alpha", json!({"who": "alpha"}))
            .route("/api/beta", json!({"who": "beta"})),
    );
    let registry = Arc::new(ModuleRegistry::new(Arc::clone(&source)));
    let orchestrator = Arc::new(Orchestrator::new(source, registry, "/api/modules"));
    orchestrator.render_pass().await;
    App::new(orchestrator, Arc::new(Notifier::new()), Config::default())
}
