//! Shared relay state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::RelayMode;
use crate::domain::{EventBus, Roster};

/// Shared relay state available to all handlers via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event bus every connection subscribes to.
    pub event_bus: EventBus,
    /// Live connections and their display names.
    pub roster: Arc<Roster>,
    /// Frame routing mode.
    pub mode: RelayMode,
}

impl AppState {
    /// Builds relay state with a fresh bus and an empty roster.
    #[must_use]
    pub fn new(event_bus_capacity: usize, max_clients: usize, mode: RelayMode) -> Self {
        Self {
            event_bus: EventBus::new(event_bus_capacity),
            roster: Arc::new(Roster::new(max_clients)),
            mode,
        }
    }
}
