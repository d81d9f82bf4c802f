//! In-process pub/sub for auth-state changes.
//!
//! Each account gets a broadcast channel keyed by account id. The login and
//! logout flows publish state transitions; the `/auth/state` SSE endpoint
//! subscribes and forwards them. Dropping a receiver is the unsubscribe;
//! `cleanup()` removes channels nobody listens to.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::domains::auth::Role;

/// One auth-state notification, as observed by a protected area.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthState {
    SignedIn { role: Role },
    SignedOut,
}

/// Broadcast hub for auth-state notifications.
///
/// Thread-safe, cloneable. Keyed by account id.
#[derive(Clone)]
pub struct AuthEventHub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<AuthState>>>>,
    capacity: usize,
}

impl AuthEventHub {
    /// Create a new hub with default capacity (64 pending events per account).
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish a state change for an account. No-op if no subscribers.
    pub async fn publish(&self, account_id: &str, state: AuthState) {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(account_id) {
            // Ignore send errors (no active receivers)
            let _ = tx.send(state);
        }
    }

    /// Subscribe to an account's state changes. Creates the channel if it
    /// doesn't exist.
    pub async fn subscribe(&self, account_id: &str) -> broadcast::Receiver<AuthState> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(account_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Remove channels with zero subscribers (housekeeping).
    ///
    /// Driven by the maintenance task spawned at startup.
    pub async fn cleanup(&self) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
    }

    /// Number of live channels, including ones whose receivers dropped
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }
}

impl Default for AuthEventHub {
    fn default() -> Self {
        Self::new()
    }
}
