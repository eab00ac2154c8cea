//! ShareHub Server: access gating and quota engine for file sharing
//!
//! Main entry point that wires all crates together and runs the engine.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use sharehub_core::config::AppConfig;
use sharehub_core::error::AppError;
use sharehub_service::EngineState;
use sharehub_worker::{CronScheduler, ExpirySweep};

/// ShareHub engine
#[derive(Debug, Parser)]
#[command(name = "sharehub-server", version, about, long_about = None)]
struct Cli {
    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, env = "SHAREHUB_ENV", default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Loaded configuration (env: {})", cli.env);

    if let Err(e) = serve(config).await {
        tracing::error!(kind = %e.kind, "Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main run function
async fn serve(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ShareHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Repositories and services ────────────────────────
    let state = EngineState::in_memory(Arc::new(config));
    tracing::info!(
        individual_tiers = state.config.plans.individual.len(),
        team_tiers = state.config.plans.team.len(),
        "Engine services initialized"
    );

    // ── Step 2: Background sweep ─────────────────────────────────
    let scheduler = if state.config.worker.enabled {
        tracing::info!("Starting cron scheduler...");
        let sweep = ExpirySweep::new(
            Arc::clone(&state.share_repo),
            Arc::clone(&state.approval_repo),
            state.config.worker.approval_retention_days,
        );
        let scheduler = CronScheduler::new(Arc::new(sweep)).await?;
        scheduler
            .register_default_tasks(&state.config.worker)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background sweep disabled");
        None
    };

    // ── Step 3: Graceful shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    tracing::info!("ShareHub shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
