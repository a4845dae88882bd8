//! Configuration loading for the dashboard.
//!
//! TOML configuration resolved from the XDG config directory, with defaults
//! when no file exists. Durations are human-readable strings (e.g. `"250ms"`,
//! `"10s"`) parsed with `humantime` at the call site.

pub mod error;
pub mod loader;
pub mod schema;
pub mod xdg;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{Config, ServerConfig, TuiConfig};
