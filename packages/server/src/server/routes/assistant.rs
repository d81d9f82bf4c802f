// FAQ assistant endpoint
//
// POST /assistant/ask. The payload is an explicit record - unknown keys
// are rejected at deserialization rather than silently merged. The handler
// itself cannot fail: the bridge collapses every fault to the fallback
// answer.

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

pub async fn ask_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<AskRequest>,
) -> Json<AskResponse> {
    let answer = state.deps.assistant.ask(&req.query).await;
    Json(AskResponse { answer })
}
