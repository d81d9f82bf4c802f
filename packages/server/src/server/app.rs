//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::session_gate_middleware;
use crate::server::routes::{
    ask_handler, auth_state_handler, dashboard_handler, health_handler, login_handler,
    logout_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// The dashboard subtree sits behind the session gate; everything else
/// (login, logout, auth-state stream, assistant, health) is public.
pub fn build_app(deps: Arc<ServerDeps>, allowed_origins: Vec<String>) -> Router {
    let state = AppState { deps: deps.clone() };

    // CORS: explicit origins when configured, any origin for development
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Clone the session store for the gate closure
    let sessions = deps.sessions.clone();

    let protected = Router::new()
        .route("/dashboard/:role", get(dashboard_handler))
        .layer(middleware::from_fn(move |req, next| {
            session_gate_middleware(sessions.clone(), req, next)
        }));

    Router::new()
        .route("/auth/:role/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/state", get(auth_state_handler))
        .route("/assistant/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
