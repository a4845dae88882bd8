//! Mount-point surface lent to a module instance.
//!
//! A [`Surface`] is the render target a module instance is permitted to draw
//! into for the duration of one mount/unmount bracket. The orchestrator owns
//! the surface and lends a [`SharedSurface`] handle to exactly one instance;
//! the instance must drop its handle on unmount.

use ratatui::text::Line;
use std::sync::{Arc, Mutex};

/// What the current surface content represents.
///
/// A failed load is never confused with a pending one or with real data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfacePhase {
    /// No completed load yet; neutral placeholder content.
    #[default]
    Loading,
    /// Content built from the last successfully fetched payload.
    Ready,
    /// Inline error state after a failed load.
    Error,
}

/// A writable buffer of styled lines plus the phase they represent.
#[derive(Debug, Default)]
pub struct Surface {
    phase: SurfacePhase,
    lines: Vec<Line<'static>>,
}

/// Shared handle to a [`Surface`], cloneable across the orchestrator, the
/// mounted instance, and its poll task.
pub type SharedSurface = Arc<Mutex<Surface>>;

impl Surface {
    /// Creates an empty surface in the [`SurfacePhase::Loading`] phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new shared surface handle.
    pub fn shared() -> SharedSurface {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Removes all content and resets the phase to loading.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.phase = SurfacePhase::Loading;
    }

    /// Replaces the surface content in one step.
    pub fn set_content(&mut self, phase: SurfacePhase, lines: Vec<Line<'static>>) {
        self.phase = phase;
        self.lines = lines;
    }

    /// Appends lines without changing the phase; used by post-render hooks.
    pub fn append(&mut self, lines: Vec<Line<'static>>) {
        self.lines.extend(lines);
    }

    /// Current phase of the content.
    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Current content lines.
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Content as plain text, one line per entry.
    ///
    /// Used by the one-shot `show` command and by tests; styling is dropped.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
