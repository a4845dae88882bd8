//! Module Dashboard - CLI entry point
//!
//! This binary provides the command-line interface for the module dashboard:
//! the TUI shell, one-shot listing/rendering commands for scripting, and
//! configuration management.

use clap::{Parser, Subcommand};
use module_dashboard::client::{fetch_listing, ApiClient, DataSource};
use module_dashboard::config::schema::parse_duration_or;
use module_dashboard::config::{xdg, Config, ConfigError, ConfigLoader};
use module_dashboard::logging;
use module_dashboard::notify::Notifier;
use module_dashboard::orchestrator::{DashboardView, Orchestrator};
use module_dashboard::registry::ModuleRegistry;
use module_dashboard::tui::app::App;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Fallback request timeout when the configured one does not parse.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Module dashboard client
#[derive(Parser)]
#[command(name = "mdash")]
#[command(version, about = "Terminal dashboard for endpoint-backed modules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the mdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui {
        /// Server base URL (overrides the configured one)
        #[arg(long)]
        server: Option<String>,
        /// Path to a configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the server's module listing
    List {
        /// Server base URL (overrides the configured one)
        #[arg(long)]
        server: Option<String>,
        /// Path to a configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Mount a module once, print its rendered surface, and exit
    Show {
        /// Module id to render
        module_id: String,
        /// Server base URL (overrides the configured one)
        #[arg(long)]
        server: Option<String>,
        /// Path to a configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tui { server, config } => run_tui(server, config).await,
        Commands::List { server, config } => {
            logging::init();
            run_list(server, config).await
        }
        Commands::Show {
            module_id,
            server,
            config,
        } => {
            logging::init();
            run_show(module_id, server, config).await
        }
        Commands::Config { action } => {
            logging::init();
            run_config(action)
        }
    }
}

/// Loads configuration from an explicit path or the default location.
fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => ConfigLoader::load_from_path(&path),
        None => ConfigLoader::load_default(),
    }
}

/// Engine handles shared by every networked subcommand.
struct Engine {
    source: Arc<dyn DataSource>,
    registry: Arc<ModuleRegistry>,
    orchestrator: Arc<Orchestrator>,
}

/// Builds the client, registry, and orchestrator from configuration.
fn build_engine(config: &Config, server_override: Option<String>) -> Result<Engine, String> {
    let base = server_override.unwrap_or_else(|| config.server.base_url.clone());
    let base_url =
        Url::parse(&base).map_err(|e| format!("invalid server URL '{base}': {e}"))?;
    let timeout = parse_duration_or(&config.server.request_timeout, DEFAULT_REQUEST_TIMEOUT);

    let source: Arc<dyn DataSource> = Arc::new(ApiClient::new(base_url, timeout));
    let registry = Arc::new(ModuleRegistry::with_defaults(Arc::clone(&source)));
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::clone(&source),
        Arc::clone(&registry),
        config.server.modules_path.clone(),
    ));
    Ok(Engine {
        source,
        registry,
        orchestrator,
    })
}

async fn run_tui(server: Option<String>, config_path: Option<PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    let engine = match build_engine(&config, server) {
        Ok(engine) => engine,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(
        Arc::clone(&engine.orchestrator),
        Arc::new(Notifier::new()),
        config,
    );
    let result = app.run().await;

    // Bulk teardown: stop every poll timer before the process exits.
    for instance in engine.registry.all() {
        instance.unmount();
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("TUI error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run_list(server: Option<String>, config_path: Option<PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    let engine = match build_engine(&config, server) {
        Ok(engine) => engine,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match fetch_listing(engine.source.as_ref(), &config.server.modules_path).await {
        Ok(listing) => {
            for descriptor in listing {
                println!(
                    "{:<16} {:<20} {:<8} {:>8}ms  {}",
                    descriptor.id,
                    descriptor.name,
                    descriptor.size.to_string(),
                    descriptor.refresh_interval_ms,
                    descriptor.endpoint
                );
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Could not fetch module listing: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run_show(
    module_id: String,
    server: Option<String>,
    config_path: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    let engine = match build_engine(&config, server) {
        Ok(engine) => engine,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    engine.orchestrator.select(Some(module_id.clone())).await;

    let code = match engine.orchestrator.view() {
        DashboardView::Mounted(card) => {
            println!("{}", card.surface.lock().expect("surface lock poisoned").text());
            ExitCode::SUCCESS
        }
        DashboardView::InitError { message } => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        DashboardView::Unselected => {
            eprintln!("module '{module_id}' is not listed by the server");
            ExitCode::FAILURE
        }
    };

    for instance in engine.registry.all() {
        instance.unmount();
    }
    code
}

fn run_config(action: ConfigAction) -> ExitCode {
    match action {
        ConfigAction::Init { force } => match ConfigLoader::init_default(force) {
            Ok(path) => {
                println!("Created {}", path.display());
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{error}");
                ExitCode::FAILURE
            }
        },
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            ExitCode::SUCCESS
        }
        ConfigAction::Validate => match ConfigLoader::load_default() {
            Ok(_) => {
                println!("Configuration OK");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{error}");
                ExitCode::FAILURE
            }
        },
    }
}
