//! Session history listing.

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::api::session::SessionId;
use crate::history::AnswerRecord;

/// GET /api/history — the caller's saved answers, most recent first.
///
/// Always 200: an unknown or fully-expired session is an empty array, and
/// expired records are purged as a side effect of the read.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> Json<Vec<AnswerRecord>> {
    Json(state.history.list(session.as_str()))
}
