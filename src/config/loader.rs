//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from a specific path or the default XDG
//! location. When the default location has no file, returns
//! `Config::default()`. Also writes configuration back, for `config init`
//! and for persisting presentation toggles.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific path.
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or
    /// `ConfigError::ReadError` for other I/O failures.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::parse_toml(&content, path)
    }

    /// Load configuration from the default XDG location.
    ///
    /// If no file exists at the default path, returns `Config::default()`
    /// instead of an error.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Serialize `config` and write it to `path`, creating parent
    /// directories as needed.
    pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write `config` to the default XDG location.
    pub fn save_default(config: &Config) -> Result<(), ConfigError> {
        Self::save_to_path(config, &xdg::config_path())
    }

    /// Create a default configuration file at the XDG location.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn init_default(force: bool) -> Result<std::path::PathBuf, ConfigError> {
        let path = xdg::config_path();
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        Self::save_to_path(&Config::default(), &path)?;
        Ok(path)
    }

    /// Parse a TOML string into `Config` with position-aware error
    /// reporting.
    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| {
                    let line = content[..span.start].matches('\n').count() + 1;
                    let last_newline = content[..span.start]
                        .rfind('\n')
                        .map(|p| p + 1)
                        .unwrap_or(0);
                    let column = span.start - last_newline + 1;
                    (line, column)
                })
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}
