//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to the HTTP layer. All external
//! services sit behind trait abstractions; lifecycle is owned by the
//! process entry point, never by module-level singletons.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::domains::assistant::AssistantBridge;
use crate::domains::auth::SessionStore;
use crate::kernel::{AuthEventHub, BaseAccountStore, BaseAI, BaseIdentityProvider};

/// Server dependencies accessible to handlers and middleware
#[derive(Clone)]
pub struct ServerDeps {
    /// Database pool, for health reporting (optional for tests)
    pub db_pool: Option<PgPool>,
    pub accounts: Arc<dyn BaseAccountStore>,
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub sessions: Arc<SessionStore>,
    pub auth_events: AuthEventHub,
    pub assistant: AssistantBridge,
}

/// Spawn the periodic maintenance task.
///
/// Evicts expired sessions (lookups only hide them) and removes
/// auth-event channels whose receivers have all dropped. Runs for the
/// life of the process; the returned handle exists for tests.
pub fn spawn_maintenance(
    deps: Arc<ServerDeps>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it
        ticker.tick().await;
        loop {
            ticker.tick().await;
            deps.sessions.cleanup_expired().await;
            deps.auth_events.cleanup().await;
            tracing::debug!("Session and auth-event maintenance complete");
        }
    })
}

impl ServerDeps {
    pub fn new(
        db_pool: Option<PgPool>,
        accounts: Arc<dyn BaseAccountStore>,
        identity: Arc<dyn BaseIdentityProvider>,
        ai: Arc<dyn BaseAI>,
        assistant_timeout: Duration,
    ) -> Self {
        Self {
            db_pool,
            accounts,
            identity,
            sessions: Arc::new(SessionStore::new()),
            auth_events: AuthEventHub::new(),
            assistant: AssistantBridge::new(ai, assistant_timeout),
        }
    }
}
