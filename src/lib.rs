//! Module Dashboard library
//!
//! This crate provides the core engine for a terminal dashboard that hosts
//! independently-refreshing modules, each backed by a server-provided JSON
//! endpoint. The engine consists of the module contract and its lifecycle
//! controller ([`modules`]), the module registry ([`registry`]), and the
//! dashboard orchestrator ([`orchestrator`]) that decides which module is
//! mounted at any time.
//!
//! Everything else in the crate (the TUI shell, configuration, CLI) is a
//! consumer of that engine.

use std::fmt;
use std::str::FromStr;

/// HTTP data-source abstraction and the reqwest-backed client.
pub mod client;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Logging initialization via the `MDASH_LOG` environment variable.
pub mod logging;

/// Module contract, lifecycle controller, and built-in modules.
pub mod modules;

/// Transient user-facing notifications.
pub mod notify;

/// Dashboard orchestrator: selection state machine and render passes.
pub mod orchestrator;

/// Module registry mapping module ids to live instances.
pub mod registry;

/// TUI shell providing the terminal user interface for the dashboard.
pub mod tui;

/// Poll interval applied when the server omits `refresh_interval_ms`.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;

/// Display size hint for a module card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSize {
    /// Compact card.
    Small,
    /// Standard card.
    #[default]
    Medium,
    /// Full-width card.
    Large,
}

impl fmt::Display for ModuleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModuleSize::Small => "small",
            ModuleSize::Medium => "medium",
            ModuleSize::Large => "large",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing a [`ModuleSize`] from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSizeError(pub String);

impl fmt::Display for ParseSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid module size: {}", self.0)
    }
}

impl std::error::Error for ParseSizeError {}

impl FromStr for ModuleSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(ModuleSize::Small),
            "medium" => Ok(ModuleSize::Medium),
            "large" => Ok(ModuleSize::Large),
            _ => Err(ParseSizeError(s.to_string())),
        }
    }
}

/// Server-declared metadata describing a module's identity, endpoint, and
/// display hints.
///
/// Descriptors are produced by the server on each dashboard-listing request
/// and are read-only on the client: they are deserialized, copied into a
/// module instance at construction, and never persisted.
///
/// # Example
///
/// ```
/// use module_dashboard::{ModuleDescriptor, ModuleSize};
///
/// let json = r##"{
///     "id": "example",
///     "name": "Example",
///     "icon": "chart",
///     "color": "#667eea",
///     "endpoint": "/api/example",
///     "description": "Demonstration module"
/// }"##;
/// let descriptor: ModuleDescriptor = serde_json::from_str(json).unwrap();
/// assert_eq!(descriptor.size, ModuleSize::Medium);
/// assert_eq!(descriptor.refresh_interval_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModuleDescriptor {
    /// Unique module identifier.
    pub id: String,
    /// Human-readable module name.
    pub name: String,
    /// Icon hint (opaque to the engine).
    pub icon: String,
    /// Color specification (opaque to the engine; the style registry extracts
    /// an accent color from it when possible).
    pub color: String,
    /// Endpoint serving this module's JSON payload, absolute or relative to
    /// the configured server base URL.
    pub endpoint: String,
    /// Short description shown in the card header.
    pub description: String,
    /// Display size hint.
    #[serde(default)]
    pub size: ModuleSize,
    /// Poll period in milliseconds; `0` disables polling.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let json = r##"{
            "id": "x",
            "name": "X",
            "icon": "i",
            "color": "#112233",
            "endpoint": "/api/x",
            "description": "d"
        }"##;
        let d: ModuleDescriptor = serde_json::from_str(json).expect("valid descriptor");
        assert_eq!(d.size, ModuleSize::Medium);
        assert_eq!(d.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn descriptor_deserializes_explicit_fields() {
        let json = r##"{
            "id": "x",
            "name": "X",
            "icon": "i",
            "color": "#112233",
            "endpoint": "/api/x",
            "description": "d",
            "size": "large",
            "refresh_interval_ms": 0
        }"##;
        let d: ModuleDescriptor = serde_json::from_str(json).expect("valid descriptor");
        assert_eq!(d.size, ModuleSize::Large);
        assert_eq!(d.refresh_interval_ms, 0);
    }

    #[test]
    fn size_round_trips_through_display_and_from_str() {
        for size in [ModuleSize::Small, ModuleSize::Medium, ModuleSize::Large] {
            let parsed: ModuleSize = size.to_string().parse().expect("parse back");
            assert_eq!(parsed, size);
        }
    }

    #[test]
    fn size_rejects_unknown_value() {
        let err = "huge".parse::<ModuleSize>().unwrap_err();
        assert!(err.to_string().contains("huge"));
    }
}
