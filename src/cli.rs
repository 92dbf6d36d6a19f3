//! Command-line entry point.
//!
//! # Responsibilities
//! - Parse `dev`, `build` and `start` with their flags
//! - Load the site configuration and apply command-line overrides
//! - Initialize logging and metrics, then run the server or the build
//!
//! # Design Decisions
//! - Applications embed the same commands by calling [`run`] with their
//!   own [`PageRegistry`]
//! - Relative directories are resolved against `--root`, never the
//!   process working directory

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::build::{BuildError, StaticBuilder};
use crate::config::validation::validate_config;
use crate::config::{load_config, AppConfig, ConfigError, Mode};
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{init_logging, init_metrics};
use crate::pages::PageRegistry;

/// Configuration file looked up in the site root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pagewright.toml";

#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(about = "File-routed server-side and static page rendering", long_about = None)]
pub struct Cli {
    /// Site configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Site root that relative directories resolve against
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve pages, rendering on every request and watching for changes
    Dev(ServeArgs),
    /// Render every static page into the output directory
    Build,
    /// Serve the production site, prebuilt pages first
    Start(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,
}

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run a parsed command with the application's registry.
pub async fn run(cli: Cli, registry: PageRegistry) -> Result<(), AppError> {
    let config = site_config(&cli)?;
    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        root = %cli.root.display(),
        "pagewright starting"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            init_metrics(addr)?;
        }
    }

    match cli.command {
        Command::Build => {
            let report = StaticBuilder::new(&config, registry).build().await?;
            tracing::info!(
                pages = report.len(),
                dist_dir = %config.paths.dist_dir.display(),
                "Build finished"
            );
        }
        Command::Dev(args) => {
            serve(with_serve_args(config, Mode::Development, args)?, registry).await?
        }
        Command::Start(args) => {
            serve(with_serve_args(config, Mode::Production, args)?, registry).await?
        }
    }

    Ok(())
}

/// Load the configuration named on the command line, or the site default.
pub fn site_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let config = match config_path(cli) {
        Some(path) => load_config(&path)?,
        None => AppConfig::default(),
    };
    Ok(config.rooted(&cli.root))
}

fn config_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let default = cli.root.join(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

/// Apply the serving mode and listener overrides, then re-validate.
pub fn with_serve_args(
    mut config: AppConfig,
    mode: Mode,
    args: ServeArgs,
) -> Result<AppConfig, ConfigError> {
    config.server.mode = mode;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

async fn serve(config: AppConfig, registry: PageRegistry) -> Result<(), AppError> {
    let listener = TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        mode = %config.server.mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    let server = HttpServer::new(config, registry).await?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, receiver).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
