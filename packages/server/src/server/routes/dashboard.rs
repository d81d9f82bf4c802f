// Protected role dashboards
//
// The session gate has already verified the session and its role claim by
// the time these run; AuthUser is guaranteed to be in extensions.

use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::domains::auth::{AuthUser, Role};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub area: Role,
    pub account_id: String,
    pub email: String,
    pub message: String,
}

pub async fn dashboard_handler(Extension(user): Extension<AuthUser>) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        area: user.role,
        account_id: user.account_id,
        message: format!("Welcome to the {} dashboard.", user.role),
        email: user.email,
    })
}
