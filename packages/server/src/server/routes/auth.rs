// Login and logout handlers
//
// POST /auth/{role}/login resolves the identifier, verifies the password
// with the identity provider, checks the account's stored role against the
// requested area, and opens a portal session. POST /auth/logout tears the
// session down and notifies auth-state subscribers.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::auth::{AuthError, IdentifierResolver, Role, Session};
use crate::kernel::AuthState;
use crate::server::app::AppState;

use super::{auth_error_response, ErrorResponse};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    /// Dashboard path the client should navigate to
    pub redirect: String,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: String,
    /// Login path the client should navigate to
    pub redirect: String,
}

pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Path(role): Path<String>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(area) = Role::parse(&role) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown role area: {}", role),
            }),
        ));
    };

    let deps = &state.deps;
    let resolver = IdentifierResolver::new(deps.accounts.clone(), deps.identity.clone());

    let identity = resolver
        .resolve(&req.identifier, &req.password)
        .await
        .map_err(auth_error_response)?;

    // Attach the account's stored role as a verified claim, and refuse
    // sign-ins into the wrong role area.
    let record = deps
        .accounts
        .find_by_email(&identity.email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Account lookup after sign-in failed");
            auth_error_response(AuthError::LookupFailed)
        })?
        .ok_or_else(|| {
            tracing::warn!(email = %identity.email, "Signed-in account has no store record");
            auth_error_response(AuthError::SignInFailed)
        })?;

    let role = Role::parse(&record.role).ok_or_else(|| {
        tracing::error!(role = %record.role, "Account store holds an unknown role");
        auth_error_response(AuthError::SignInFailed)
    })?;

    if role != area {
        return Err(auth_error_response(AuthError::RoleMismatch(area)));
    }

    let token = deps
        .sessions
        .create_session(Session {
            account_id: identity.account_id.clone(),
            email: identity.email.clone(),
            role,
            created_at: chrono::Utc::now(),
        })
        .await;

    deps.auth_events
        .publish(&identity.account_id, AuthState::SignedIn { role })
        .await;

    info!(account_id = %identity.account_id, role = %role, "Session opened");

    Ok(Json(LoginResponse {
        token,
        role,
        redirect: role.dashboard_path().to_string(),
    }))
}

pub async fn logout_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let deps = &state.deps;

    let token = extract_bearer_token(&headers)
        .ok_or_else(|| auth_error_response(AuthError::AuthenticationRequired))?;

    let session = deps
        .sessions
        .get_session(&token)
        .await
        .ok_or_else(|| auth_error_response(AuthError::AuthenticationRequired))?;

    // Provider sign-out first; on failure the session stays live and the
    // caller remains where they are (no retry).
    if let Err(e) = deps.identity.sign_out(&session.account_id).await {
        tracing::error!(error = %e, "Identity provider sign-out failed");
        return Err(auth_error_response(AuthError::SignOutFailed));
    }

    deps.sessions.delete_session(&token).await;
    deps.auth_events
        .publish(&session.account_id, AuthState::SignedOut)
        .await;

    info!(account_id = %session.account_id, "Session closed");

    Ok(Json(LogoutResponse {
        message: "Signed out successfully.".to_string(),
        redirect: session.role.login_path().to_string(),
    }))
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ").unwrap_or(auth);
    Some(token.to_string())
}
