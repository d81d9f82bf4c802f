// Session gate for the role dashboards
//
// Runs in front of /dashboard/{role}. A request passes only when it
// carries a live session whose role claim matches the dashboard area;
// everything else is redirected to the area's login route before the
// protected handler runs.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::domains::auth::{AuthUser, Role, SessionStore};

/// Session-gate middleware over the dashboard subtree.
///
/// - no/unknown/expired token: 303 redirect to the area's login route
/// - live session with a different role: redirect to that role's own login
/// - live session with the matching role: AuthUser lands in extensions and
///   the protected handler runs
pub async fn session_gate_middleware(
    sessions: Arc<SessionStore>,
    mut request: Request,
    next: Next,
) -> Response {
    // Dashboard area from the path; non-dashboard paths pass through,
    // unknown areas under /dashboard/ are 404, not gated content
    let path = request.uri().path();
    let area = if path.starts_with("/dashboard/") {
        match dashboard_area(path) {
            Some(area) => area,
            None => return StatusCode::NOT_FOUND.into_response(),
        }
    } else {
        return next.run(request).await;
    };

    let session = match extract_bearer_token(&request) {
        Some(token) => sessions.get_session(&token).await,
        None => None,
    };

    let Some(session) = session else {
        debug!(area = %area, "No live session; redirecting to login");
        return Redirect::to(area.login_path()).into_response();
    };

    if session.role != area {
        debug!(
            area = %area,
            role = %session.role,
            "Session role does not match dashboard area; redirecting"
        );
        return Redirect::to(session.role.login_path()).into_response();
    }

    request.extensions_mut().insert(AuthUser {
        account_id: session.account_id,
        email: session.email,
        role: session.role,
    });

    next.run(request).await
}

/// Parse the role area out of a /dashboard/{role} path
fn dashboard_area(path: &str) -> Option<Role> {
    let rest = path.strip_prefix("/dashboard/")?;
    let area = rest.split('/').next().unwrap_or(rest);
    Role::parse(area)
}

fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth = request.headers().get("authorization")?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ").unwrap_or(auth);
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_area_parsing() {
        assert_eq!(dashboard_area("/dashboard/student"), Some(Role::Student));
        assert_eq!(dashboard_area("/dashboard/admin"), Some(Role::Admin));
        assert_eq!(dashboard_area("/dashboard/janitor"), None);
        assert_eq!(dashboard_area("/health"), None);
    }
}
