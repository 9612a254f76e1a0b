//! Registry of live relay connections.
//!
//! [`Roster`] maps every open connection to the display name it announced
//! (if any yet). It enforces the relay's connection limit and feeds the
//! health endpoint.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{ConnectionId, DisplayName};
use crate::error::ChatError;

/// Central store of connected clients.
#[derive(Debug)]
pub struct Roster {
    max_clients: usize,
    members: RwLock<HashMap<ConnectionId, Option<DisplayName>>>,
}

impl Roster {
    /// Creates an empty roster that admits at most `max_clients`.
    #[must_use]
    pub fn new(max_clients: usize) -> Self {
        Self {
            max_clients,
            members: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new, still unnamed connection.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::RelayFull`] if the roster is at capacity, or
    /// [`ChatError::Internal`] if `id` is already registered.
    pub async fn admit(&self, id: ConnectionId) -> Result<(), ChatError> {
        let mut map = self.members.write().await;
        if map.len() >= self.max_clients {
            return Err(ChatError::RelayFull {
                max_clients: self.max_clients,
            });
        }
        if map.contains_key(&id) {
            return Err(ChatError::Internal(format!(
                "connection {id} already registered"
            )));
        }
        map.insert(id, None);
        Ok(())
    }

    /// Records the display name announced by `id`. Unknown ids are ignored.
    pub async fn set_name(&self, id: ConnectionId, name: DisplayName) {
        if let Some(slot) = self.members.write().await.get_mut(&id) {
            *slot = Some(name);
        }
    }

    /// Removes `id`, returning its display name if it had one.
    pub async fn remove(&self, id: ConnectionId) -> Option<DisplayName> {
        self.members.write().await.remove(&id).flatten()
    }

    /// Number of registered connections.
    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    /// Returns `true` if no connections are registered.
    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn name(raw: &str) -> DisplayName {
        let Ok(name) = DisplayName::parse(raw) else {
            panic!("valid name");
        };
        name
    }

    #[tokio::test]
    async fn admit_and_remove() {
        let roster = Roster::new(4);
        let id = ConnectionId::new();

        assert!(roster.admit(id).await.is_ok());
        assert_eq!(roster.len().await, 1);

        roster.set_name(id, name("alice")).await;
        assert_eq!(roster.remove(id).await, Some(name("alice")));
        assert!(roster.is_empty().await);
    }

    #[tokio::test]
    async fn unnamed_connection_removes_without_name() {
        let roster = Roster::new(4);
        let id = ConnectionId::new();
        assert!(roster.admit(id).await.is_ok());
        assert!(roster.remove(id).await.is_none());
        assert_eq!(roster.len().await, 0);
    }

    #[tokio::test]
    async fn admit_rejects_when_full() {
        let roster = Roster::new(1);
        let first = ConnectionId::new();
        assert!(roster.admit(first).await.is_ok());

        let result = roster.admit(ConnectionId::new()).await;
        assert!(matches!(result, Err(ChatError::RelayFull { max_clients: 1 })));

        let _ = roster.remove(first).await;
        assert!(roster.admit(ConnectionId::new()).await.is_ok());
    }

    #[tokio::test]
    async fn admit_rejects_duplicates() {
        let roster = Roster::new(4);
        let id = ConnectionId::new();
        assert!(roster.admit(id).await.is_ok());
        assert!(matches!(roster.admit(id).await, Err(ChatError::Internal(_))));
    }

    #[tokio::test]
    async fn set_name_ignores_unknown_ids() {
        let roster = Roster::new(4);
        let id = ConnectionId::new();
        roster.set_name(id, name("ghost")).await;
        assert!(roster.remove(id).await.is_none());
        assert!(roster.is_empty().await);
    }
}
