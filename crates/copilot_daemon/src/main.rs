//! Shipping autopilot daemon.
//!
//! Wires the engine onto a tokio runtime: builds the HTTP gateway from the
//! player's session cookie, starts the jittered scheduler, and serves a
//! small local status/stream API for UI clients.

mod routes;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use copilot_client::HttpGateway;
use copilot_engine::{scheduler, AutoPilot, AutopilotSettings};
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "copilot_daemon", about = "Shipping autopilot daemon")]
struct Cli {
    /// Base URL of the game API.
    #[arg(long)]
    base_url: String,
    /// Session cookie of the logged-in player, e.g. "session=abc123".
    #[arg(long)]
    session: String,
    /// Path to the autopilot settings JSON file. Defaults apply when omitted.
    #[arg(long)]
    settings: Option<String>,
    /// Listen address for the local status API.
    #[arg(long, default_value = "127.0.0.1:8094")]
    listen: String,
    /// Allowed CORS origin for the status API.
    #[arg(long, default_value = "http://localhost:5173")]
    cors_origin: String,
    /// Run one pass of every feature and exit.
    #[arg(long)]
    once: bool,
}

fn load_settings(path: Option<&str>) -> Result<AutopilotSettings> {
    let Some(path) = path else {
        return Ok(AutopilotSettings::default());
    };
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;
    let gateway = HttpGateway::new(&cli.base_url, &cli.session).context("building gateway")?;
    let pilot = Arc::new(AutoPilot::new(Arc::new(gateway), settings));

    if cli.once {
        pilot.run_once().await;
        return Ok(());
    }

    let app = routes::make_router_with_cors(
        AppState {
            pilot: pilot.clone(),
        },
        &cli.cors_origin,
    );
    let listener = tokio::net::TcpListener::bind(&cli.listen)
        .await
        .with_context(|| format!("binding {}", cli.listen))?;
    tracing::info!(addr = %cli.listen, "status API listening");

    tokio::select! {
        () = scheduler::run(pilot) => {}
        result = axum::serve(listener, app) => {
            result.context("serving status API")?;
        }
    }
    Ok(())
}
