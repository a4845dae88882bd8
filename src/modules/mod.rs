//! Module system for the dashboard.
//!
//! This module defines the [`Module`] trait that every dashboard module
//! implements, and the [`ModuleInstance`] lifecycle controller that drives
//! mount → load → render → poll → unmount for all of them.
//!
//! # Architecture
//!
//! A module contributes only what differs between widgets: its descriptor
//! and a small set of hooks (`template`, `error_template`, `on_data_loaded`,
//! `on_data_error`, `after_render`), each with a default body. The lifecycle
//! controller supplies `mount`, `unmount`, `render`, `load`, and `refresh`
//! once, so a new widget is just a trait impl plus a factory registered in
//! the [`crate::registry::ModuleRegistry`].
//!
//! Rendering happens into a [`Surface`] owned by the orchestrator and lent
//! to the instance for the duration of one mount.

pub mod example;
pub mod format;
pub mod generic;
pub mod instance;
pub mod jobs;
pub mod styles;
pub mod surface;

pub use example::ExampleModule;
pub use instance::ModuleInstance;
pub use jobs::JobsModule;
pub use surface::{SharedSurface, Surface, SurfacePhase};

use crate::client::FetchError;
use crate::ModuleDescriptor;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use serde_json::Value;

/// Trait implemented by all dashboard modules.
///
/// Implementations must be `Send` so the lifecycle controller can drive them
/// from the poll task. Every hook has a default body; a minimal module only
/// supplies its [`descriptor`](Module::descriptor).
pub trait Module: Send {
    /// Descriptor this module declares for itself.
    ///
    /// Copied into the [`ModuleInstance`] once at construction.
    fn descriptor(&self) -> ModuleDescriptor;

    /// Builds the body content from the last successfully fetched payload.
    ///
    /// The default pretty-prints the payload, mirroring the generic view.
    fn template(&self, data: &Value) -> Vec<Line<'static>> {
        default_template(data)
    }

    /// Builds the inline error content shown after a failed load.
    fn error_template(&self, message: &str) -> Vec<Line<'static>> {
        error_lines(message)
    }

    /// Called after each successful load with the fresh payload.
    fn on_data_loaded(&mut self, _data: &Value) {}

    /// Called after each failed load with the transport error.
    fn on_data_error(&mut self, _error: &FetchError) {}

    /// Called after the surface content has been rebuilt from `template`;
    /// used for post-render additions such as drawing a chart.
    fn after_render(&mut self, _surface: &mut Surface) {}
}

/// Factory function type for creating module values.
pub type ModuleFactory = fn() -> Box<dyn Module>;

/// Default body content: a hint plus the pretty-printed payload.
pub fn default_template(data: &Value) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        "Implement template() in your module",
        Style::default().fg(Color::DarkGray),
    )];
    lines.extend(json_lines(data));
    lines
}

/// Inline error content, distinguishable from loading and ready states.
pub fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::styled(
            "! Error loading module",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::styled(message.to_string(), Style::default().fg(Color::Red)),
    ]
}

/// Neutral loading placeholder rendered while no load has completed.
pub fn loading_lines() -> Vec<Line<'static>> {
    vec![Line::styled(
        "Loading…",
        Style::default().fg(Color::DarkGray),
    )]
}

/// Pretty-prints a JSON value, one surface line per text line.
pub fn json_lines(value: &Value) -> Vec<Line<'static>> {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    pretty.lines().map(|l| Line::raw(l.to_string())).collect()
}
