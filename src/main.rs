//! Dashboard backend (idp-gateway)
//!
//! # Architecture Overview
//!
//! ```text
//!     Dashboard UI                 ┌──────────────────────────────────────────────┐
//!     ─────────────── GET /api/* ─▶│ http (axum, CORS, request id, trace)         │
//!                                  │     │                                        │
//!                                  │     ▼                                        │
//!                                  │ gateway ── mode? ──┬── MOCK → jira/fixtures  │
//!                                  │                    └── LIVE → jira/client ───┼──▶ Jira REST API
//!                                  │     │                                        │
//!                                  │     ▼                                        │
//!                                  │ jira/normalize → jira/classify → JSON        │
//!                                  └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use idp_gateway::config::loader::{load_config, load_dotenv};
use idp_gateway::gateway::Mode;
use idp_gateway::lifecycle::signals::forward_signals;
use idp_gateway::observability::{logging, metrics};
use idp_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "idp-gateway")]
#[command(about = "Developer-platform dashboard backend", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let env_file = load_dotenv();

    let config = load_config(args.config.as_deref())?;
    logging::init_logging(&config.observability)?;

    tracing::info!("idp-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "Loaded env file");
    }

    let mode = Mode::select(&config);
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        mode = %mode,
        jira_base_url = ?config.jira.base_url,
        jira_configured = config.jira.is_configured(),
        "Configuration loaded"
    );
    if mode == Mode::Live && !config.jira.is_configured() {
        tracing::warn!("Live mode without JIRA_BASE_URL/JIRA_API_TOKEN; Jira endpoints will answer 501");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(forward_signals(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
