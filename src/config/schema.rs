//! TOML configuration schema types for the dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults
//! via `#[serde(default)]`, so a partial file only overrides what it names.
//! Duration fields are human-readable strings (e.g. `"10s"`, `"250ms"`)
//! parsed with [`parse_duration_or`] at the call site.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [server]
/// [tui]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dashboard server connection settings.
    pub server: ServerConfig,
    /// TUI appearance and behavior settings.
    pub tui: TuiConfig,
}

/// Dashboard server connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL all relative endpoints resolve against.
    pub base_url: String,
    /// Path of the module-listing endpoint.
    pub modules_path: String,
    /// Per-request timeout as a human-readable duration.
    pub request_timeout: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            modules_path: "/api/modules".to_string(),
            request_timeout: "10s".to_string(),
        }
    }
}

/// TUI appearance and behavior settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate as a human-readable duration.
    pub tick_rate: String,
    /// Whether the module sidebar starts collapsed. Persisted when toggled.
    pub sidebar_collapsed: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            sidebar_collapsed: false,
        }
    }
}

/// Parses a human-readable duration, falling back to `default` on invalid
/// input.
pub fn parse_duration_or(value: &str, default: Duration) -> Duration {
    match humantime::parse_duration(value) {
        Ok(duration) => duration,
        Err(_) => {
            tracing::warn!("invalid duration '{}', using {:?}", value, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.server.modules_path, "/api/modules");
        assert!(!config.tui.sidebar_collapsed);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            [server]
            base_url = "http://dash.internal:9000"
            "#,
        )
        .expect("valid partial config");
        assert_eq!(config.server.base_url, "http://dash.internal:9000");
        assert_eq!(config.server.modules_path, "/api/modules");
        assert_eq!(config.tui.tick_rate, "250ms");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.tui.sidebar_collapsed = true;
        let serialized = toml::to_string(&config).expect("serializes");
        let parsed: Config = toml::from_str(&serialized).expect("parses back");
        assert_eq!(parsed, config);
    }

    #[test]
    fn parse_duration_or_accepts_humantime_strings() {
        assert_eq!(
            parse_duration_or("250ms", Duration::from_secs(1)),
            Duration::from_millis(250)
        );
        assert_eq!(
            parse_duration_or("10s", Duration::from_secs(1)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn parse_duration_or_falls_back_on_garbage() {
        assert_eq!(
            parse_duration_or("soon", Duration::from_secs(7)),
            Duration::from_secs(7)
        );
    }
}
