//! Zappy server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Parse flags and load configuration
//! 3. Build the game and bind the listener
//! 4. Run the reactor until a signal arrives or the game ends

use anyhow::Context as _;
use clap::Parser as _;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zappy_server::cli::Args;
use zappy_server::reactor::Reactor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("zappy-server starting");

    let config = Args::parse().into_config().context("invalid configuration")?;
    info!(
        port = config.port,
        width = config.width,
        height = config.height,
        teams = ?config.teams,
        clients_per_team = config.clients_per_team,
        frequency = config.frequency,
        seed = ?config.seed,
        "Configuration loaded"
    );

    let reactor = Reactor::bind(config).await?;
    info!(addr = %reactor.local_addr()?, "listening");

    let outcome = reactor.run(shutdown_signal()).await?;
    info!(outcome = ?outcome, "zappy-server shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
