//! Auth-state SSE endpoint.
//!
//! GET /auth/state?token=SESSION_TOKEN
//!
//! A protected area subscribes here on mount. The current state is emitted
//! as the first event, then every subsequent transition for the account
//! (e.g. a logout from another tab) is forwarded. Closing the connection
//! drops the broadcast receiver - that is the unsubscribe.
//!
//! Auth strategy: session token as `?token=` query param, because
//! EventSource can't send custom headers; the Authorization header is
//! accepted as a fallback for non-browser clients.

use std::convert::Infallible;

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;

use crate::kernel::AuthState;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct StreamQuery {
    /// Session token for authentication
    token: Option<String>,
}

pub async fn auth_state_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    let token = query
        .token
        .or_else(|| extract_bearer_token(&headers))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let session = state
        .deps
        .sessions
        .get_session(&token)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let rx = state.deps.auth_events.subscribe(&session.account_id).await;

    // First notification: the state as of subscription
    let current = AuthState::SignedIn { role: session.role };
    let first = stream::once(async move { Ok::<_, Infallible>(auth_event(&current)) });

    let updates = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(auth_state) => Some(Ok(auth_event(&auth_state))),
            Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => Some(Ok(
                Event::default()
                    .event("lagged")
                    .data(format!("{{\"missed\":{}}}", n)),
            )),
        }
    });

    Ok(Sse::new(first.chain(updates)).keep_alive(KeepAlive::default()))
}

/// Render an auth-state change as an SSE event
fn auth_event(auth_state: &AuthState) -> Event {
    let name = match auth_state {
        AuthState::SignedIn { .. } => "signed_in",
        AuthState::SignedOut => "signed_out",
    };

    let event = Event::default().event(name);
    match event.json_data(auth_state) {
        Ok(event) => event,
        // AuthState serialization cannot fail; keep the stream alive anyway
        Err(_) => Event::default().event(name).data("{}"),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    auth.strip_prefix("Bearer ").map(|t| t.to_string())
}
