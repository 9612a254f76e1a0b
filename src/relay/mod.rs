//! Relay layer: WebSocket endpoint, per-connection loop, health check and
//! operator console.
//!
//! The relay is the counterpart of the chat widget. It accepts raw text
//! frames at `/` (and `/ws`), treats the first one as the sender's display
//! name and relays the rest.

pub mod connection;
pub mod console;
pub mod handler;
pub mod system;

use std::future::Future;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::domain::RelayEvent;
use handler::ws_handler;

/// Close reason sent to every client when the relay stops.
pub const SHUTDOWN_REASON: &str = "server shutting down";

/// Builds the relay router with the WebSocket and system endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .merge(system::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the relay on `listener` until `shutdown` resolves.
///
/// When `shutdown` fires, every connection is told to close with
/// [`SHUTDOWN_REASON`] before the server stops accepting.
///
/// # Errors
///
/// Returns an I/O error if the server fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bus = state.event_bus.clone();
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let notified = bus.publish(RelayEvent::Shutdown {
                reason: SHUTDOWN_REASON.to_string(),
            });
            tracing::info!(clients = notified, "relay shutting down");
        })
        .await
}
