//! The signed-in session: token access plus the session-expired signal.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

use crate::storage::{MemoryTokenStore, StorageError, TokenStore};
use shared::config::client::DEFAULT_TOKEN_KEY;

const EVENT_CAPACITY: usize = 16;

/// Handle to the session token inside an injected store.
#[derive(Clone, Debug)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    key: String,
}

impl Session {
    /// A session reading and writing the token under `key` in `store`.
    pub fn new(store: Arc<dyn TokenStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// A session backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()), DEFAULT_TOKEN_KEY)
    }

    /// Store key the token lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored token. An empty value counts as no token.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .read(&self.key)?
            .filter(|token| !token.is_empty()))
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.write(&self.key, token)
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear(&self.key)
    }

    /// Presence check only; says nothing about whether the backend still
    /// accepts the token. An unreadable store counts as signed out.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self.token() {
            Ok(token) => token.is_some(),
            Err(err) => {
                warn!(error = %err, "failed to read session token");
                false
            }
        }
    }
}

/// Session lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected the session with 401.
    Expired,
}

/// Fan-out of [`SessionEvent`]s to every subscriber.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl Default for SessionEvents {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }
}

impl SessionEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A receiver for every event emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Send `event` to all current subscribers.
    pub fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }
}

/// Drains `receiver` and reports whether an expiry was seen.
///
/// Lagging counts as expired since only expiries are ever sent.
pub fn drain_expired(receiver: &mut broadcast::Receiver<SessionEvent>) -> bool {
    let mut expired = false;
    loop {
        match receiver.try_recv() {
            Ok(SessionEvent::Expired) | Err(broadcast::error::TryRecvError::Lagged(_)) => {
                expired = true;
            }
            Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
                return expired;
            }
        }
    }
}
