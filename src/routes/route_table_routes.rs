//! Route table listing.

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::debug;

use crate::state::AppState;

/// Registers route table routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/routes", get(list_routes))
}

/// GET /routes: every declared route with its access requirements.
async fn list_routes(State(state): State<AppState>) -> Json<Value> {
    let routes: Vec<Value> = state
        .table
        .descriptors()
        .map(|route| {
            json!({
                "name": route.name,
                "path": route.path,
                "requires_auth": route.meta.requires_auth,
                "requires_admin": route.meta.requires_admin,
            })
        })
        .collect();

    debug!("Returning route table with {} routes", routes.len());
    Json(json!({ "routes": routes }))
}
