//! parlor-relay entry point.
//!
//! Starts the Axum server with the WebSocket endpoint, the health check
//! and (optionally) the operator console on stdin.

use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use parlor::app_state::AppState;
use parlor::config::{LogFormat, RelayConfig};
use parlor::relay;
use parlor::relay::console::{self, ConsoleExit};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, mode = ?config.mode, "starting parlor-relay");

    // Build application state
    let state = AppState::new(config.event_bus_capacity, config.max_clients, config.mode);

    // Operator console
    let console = if config.console_enabled {
        let lines = console::spawn_stdin_reader()?;
        Some(tokio::spawn(console::run(lines, state.event_bus.clone())))
    } else {
        None
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "relay listening");

    relay::serve(listener, state, shutdown_signal(console)).await?;

    tracing::info!("relay stopped");
    Ok(())
}

/// Resolves on Ctrl+C or when the operator types `quit`.
async fn shutdown_signal(console: Option<JoinHandle<ConsoleExit>>) {
    let console_quit = async move {
        if let Some(handle) = console
            && matches!(handle.await, Ok(ConsoleExit::Quit))
        {
            return;
        }
        std::future::pending::<()>().await;
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "cannot listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("ctrl-c received");
        }
        () = console_quit => {}
    }
}
