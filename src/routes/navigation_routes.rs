//! Navigation decision endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::guard::NavigationRequest;
use crate::models::NavigationOutcome;
use crate::navigation::{resolve_chain, NavigationError, Resolution};
use crate::session::{BearerSession, SessionState};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers navigation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/navigate", get(navigate))
        .route("/resolve", get(resolve))
}

/// Rejections from the query extractor, as a JSON error body.
fn bad_query(rejection: QueryRejection) -> HTTPError {
    HTTPError::new(StatusCode::BAD_REQUEST, rejection.body_text())
}

#[derive(Deserialize)]
struct NavigateParams {
    to: String,
    from: Option<String>,
}

/// GET /navigate?to=..&from=..: the guard's single decision for this hop.
async fn navigate(
    State(state): State<AppState>,
    bearer: BearerSession,
    params: Result<Query<NavigateParams>, QueryRejection>,
) -> Result<Json<Value>, HTTPError> {
    let Query(params) = params.map_err(bad_query)?;
    let session = SessionState::load(&bearer).await;
    let to = state.table.resolve(&params.to);
    let from = params.from.as_deref().map(|raw| state.table.resolve(raw));

    let request = NavigationRequest {
        to: &to,
        from: from.as_ref(),
    };
    let body = match state.guard.before_each(request, &session).await {
        NavigationOutcome::Proceed => json!({
            "outcome": "proceed",
            "to": to.full_path,
        }),
        NavigationOutcome::Redirect(redirect) => {
            let location = state
                .table
                .resolve_named(&redirect.name, &Default::default(), redirect.query.clone())
                .map_err(|e| HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            json!({
                "outcome": "redirect",
                "to": location.full_path,
                "name": redirect.name,
                "query": redirect.query,
            })
        }
    };
    Ok(Json(body))
}

#[derive(Deserialize)]
struct ResolveParams {
    to: String,
}

/// GET /resolve?to=..: follow redirects to where the user actually lands.
async fn resolve(
    State(state): State<AppState>,
    bearer: BearerSession,
    params: Result<Query<ResolveParams>, QueryRejection>,
) -> Result<Json<Resolution>, HTTPError> {
    let Query(params) = params.map_err(bad_query)?;
    let session = SessionState::load(&bearer).await;
    let target = state.table.resolve(&params.to);
    resolve_chain(&state.guard, &state.table, &session, None, target)
        .await
        .map(Json)
        .map_err(|e| match e {
            NavigationError::RedirectLoop { .. } => {
                HTTPError::new(StatusCode::LOOP_DETECTED, e.to_string())
            }
            other => HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })
}
