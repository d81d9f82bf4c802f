// HTTP route handlers

pub mod assistant;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod stream;

pub use assistant::*;
pub use auth::*;
pub use dashboard::*;
pub use health::*;
pub use stream::*;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::domains::auth::AuthError;

/// User-facing error body; `error` carries the fixed message verbatim
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a domain auth error to its HTTP status + fixed message
pub fn auth_error_response(err: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        AuthError::InvalidIdentifier | AuthError::InvalidEmailFormat => StatusCode::BAD_REQUEST,
        AuthError::PhoneNotFound
        | AuthError::NoLinkedEmail
        | AuthError::InvalidCredentials
        | AuthError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        AuthError::RoleMismatch(_) => StatusCode::FORBIDDEN,
        AuthError::SignInFailed | AuthError::SignOutFailed => StatusCode::BAD_GATEWAY,
        AuthError::LookupFailed => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
