//! # kdsd: kitchen display daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Construct the in-memory order store and the board bus
//! - Construct the order service and spawn the removal worker
//! - Spawn the console display when enabled
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use kds_adapter_console::ConsoleDisplay;
use kds_adapter_http_axum::state::AppState;
use kds_adapter_storage_memory::InMemoryOrderStore;
use kds_app::board_bus::InProcessBoardBus;
use kds_app::removal::removal_channel;
use kds_app::services::order_service::OrderService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    // Logs go to stderr; stdout belongs to the console board.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let capacity = config.display.channel_capacity;
    let board_bus = Arc::new(InProcessBoardBus::new(capacity));
    let order_service = Arc::new(
        OrderService::new(InMemoryOrderStore::new(), Arc::clone(&board_bus))
            .with_mode(config.intake.mode),
    );

    let (removal, worker) = removal_channel(Arc::clone(&order_service), capacity);
    tokio::spawn(worker.run());

    if config.display.console {
        // Subscribe before reading the board so no update falls between.
        let updates = board_bus.subscribe();
        let initial = order_service
            .snapshot()
            .await
            .context("failed to read initial board")?;
        let display = ConsoleDisplay::new(std::io::stdout()).clearing(true);
        tokio::spawn(display.run(initial, updates));
    }

    let state = AppState::new(order_service, removal, board_bus);
    let app = kds_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        mode = ?config.intake.mode,
        console = config.display.console,
        "kdsd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("kdsd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
