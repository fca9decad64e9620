//! Current-user profile endpoint.

use axum::http::StatusCode;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::warn;

use crate::session::{BearerSession, SessionState};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers current-user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(current_user))
}

/// GET /me: the caller's profile, fetched fresh from the API.
/// Without a session the API is not contacted and the user is `null`.
async fn current_user(
    State(state): State<AppState>,
    bearer: BearerSession,
) -> Result<Json<Value>, HTTPError> {
    let session = SessionState::load(&bearer).await;
    let user = state.api.current_user(session.token()).await.map_err(|e| {
        warn!("Failed to fetch current user: {}", e);
        HTTPError::new(StatusCode::BAD_GATEWAY, "Upstream API request failed")
    })?;
    Ok(Json(json!({ "current_user": user })))
}
