//! Reservoir Twin - forecast-driven reservoir dashboard
//!
//! Serves the dashboard and its JSON API, or renders a single snapshot.
//!
//! # Usage
//!
//! ```bash
//! # Serve on the configured address (default 0.0.0.0:8080)
//! cargo run --release
//!
//! # Serve a specific well file
//! ./reservoir-twin --data "Data/15_9-F-9 A.las"
//!
//! # Print the 2030 snapshot as JSON
//! ./reservoir-twin snapshot --year 2030 --pretty
//! ```
//!
//! # Environment Variables
//!
//! - `TWIN_CONFIG`: Path to a TOML config file (default: ./twin_config.toml)
//! - `TWIN_SERVER_ADDR`: Bind address override (below `--addr`)
//! - `TWIN_LOG_FORMAT`: `json` for JSON log lines
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use axum::Router;
use reservoir_twin::api::{create_app, DashboardState};
use reservoir_twin::config::TwinConfig;
use reservoir_twin::ingest::{self, DatasetLoader};
use reservoir_twin::render::DashboardRenderer;
use reservoir_twin::types::{ForecastYear, LoadedDataset};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "reservoir-twin")]
#[command(about = "Reservoir digital twin dashboard")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long, value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Path to a TOML config file (overrides TWIN_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default well file (CSV or LAS) instead of the configured one
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Render the dashboard for one forecast year and print it as JSON
    Snapshot {
        /// Forecast year (2026-2035, default from config)
        #[arg(long)]
        year: Option<i32>,
        /// Well file to render instead of the default source (no fallback)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

// ============================================================================
// Configuration
// ============================================================================

/// Load the config from `--config` if given, otherwise the standard search.
fn load_config(path: Option<&Path>) -> Result<TwinConfig> {
    match path {
        Some(p) => TwinConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(TwinConfig::load()),
    }
}

/// Bind address precedence: `--addr` > `TWIN_SERVER_ADDR` > config.
fn resolve_server_addr(cli: Option<String>, config: &TwinConfig) -> String {
    cli.or_else(|| std::env::var("TWIN_SERVER_ADDR").ok())
        .unwrap_or_else(|| config.server.addr.clone())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("TWIN_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

// ============================================================================
// Task Names for Supervisor Logging
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum TaskName {
    HttpServer,
}

impl std::fmt::Display for TaskName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskName::HttpServer => write!(f, "HttpServer"),
        }
    }
}

/// Spawn the HTTP server task into the JoinSet.
fn spawn_http_server(
    task_set: &mut JoinSet<Result<TaskName>>,
    listener: tokio::net::TcpListener,
    app: Router,
    cancel_token: CancellationToken,
) {
    task_set.spawn(async move {
        info!("[HttpServer] Task starting");

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel_token.cancelled().await;
                info!("[HttpServer] Received shutdown signal");
            })
            .await;

        match result {
            Ok(()) => {
                info!("[HttpServer] Graceful shutdown complete");
                Ok(TaskName::HttpServer)
            }
            Err(e) => {
                error!("[HttpServer] Server error: {}", e);
                Err(anyhow::anyhow!("HTTP server error: {}", e))
            }
        }
    });
}

/// Run the supervisor loop: monitor tasks, cancel on failure.
async fn run_supervisor(
    task_set: &mut JoinSet<Result<TaskName>>,
    cancel_token: CancellationToken,
) -> Result<()> {
    info!("Supervisor: all tasks spawned, monitoring");

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                info!("Supervisor: shutdown signal received");
                break;
            }
            result = task_set.join_next() => {
                match result {
                    Some(Ok(Ok(task_name))) => {
                        info!("Supervisor: task {} completed normally", task_name);
                    }
                    Some(Ok(Err(e))) => {
                        error!("Supervisor: task failed with error: {}", e);
                        cancel_token.cancel();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        error!("Supervisor: task panicked: {}", e);
                        cancel_token.cancel();
                        return Err(anyhow::anyhow!("Task panicked: {}", e));
                    }
                    None => {
                        info!("Supervisor: all tasks completed");
                        break;
                    }
                }
            }
        }
    }

    // Let the server finish draining after a Ctrl+C.
    while let Some(result) = task_set.join_next().await {
        if let Ok(Err(e)) = result {
            warn!("Task ended with error during shutdown: {}", e);
        }
    }

    Ok(())
}

// ============================================================================
// Modes
// ============================================================================

async fn run_snapshot(
    config: &TwinConfig,
    loader: &DatasetLoader,
    year: Option<i32>,
    file: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let year = match year {
        Some(y) => ForecastYear::new(y)?,
        None => ForecastYear::new(config.forecast.default_year)?,
    };

    let loaded: LoadedDataset = match file {
        Some(path) => loader
            .load_path(path)
            .with_context(|| format!("Failed to load well file {}", path.display()))?,
        None => loader.load_default().await?,
    };
    if let reservoir_twin::DatasetOrigin::Synthetic { ref reason } = loaded.origin {
        warn!(reason = %reason, "Snapshot rendered from synthetic data");
    }

    let snapshot = DashboardRenderer::new(config.display.clone()).render(year, &loaded.dataset);
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}

async fn run_server(config: TwinConfig, loader: &DatasetLoader, addr_override: Option<String>) -> Result<()> {
    let server_addr = resolve_server_addr(addr_override, &config);

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  {}", config.branding.header);
    info!("  {}", config.branding.subtitle);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let default_dataset = loader.load_default().await?;
    match &default_dataset.origin {
        reservoir_twin::DatasetOrigin::Synthetic { reason } => {
            warn!(reason = %reason, "Default dataset unavailable, serving synthetic well");
        }
        origin => info!(origin = ?origin, rows = default_dataset.dataset.len(), "Default dataset ready"),
    }

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown");
        shutdown_token.cancel();
    });

    let state = DashboardState::new(config, default_dataset);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind {server_addr}"))?;
    info!("Dashboard: http://{}", server_addr);

    let mut task_set = JoinSet::new();
    spawn_http_server(&mut task_set, listener, app, cancel_token.clone());
    run_supervisor(&mut task_set, cancel_token).await
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref())?;

    let mut loader = DatasetLoader::from_config(&config).context("Failed to set up data sources")?;
    if let Some(path) = args.data {
        ingest::DataFormat::from_file_name(&path.display().to_string())
            .with_context(|| format!("Cannot use {} as well data", path.display()))?;
        loader = loader.with_default_path(Some(path));
    }

    match args.command {
        Some(SubCommand::Snapshot { year, file, pretty }) => {
            run_snapshot(&config, &loader, year, file.as_deref(), pretty).await
        }
        None => {
            run_server(config, &loader, args.addr).await?;
            info!("Reservoir twin shutdown complete");
            Ok(())
        }
    }
}
