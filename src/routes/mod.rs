//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! navigation decisions, the route table, the current user, health and metrics.

mod health_routes;
mod metrics_routes;
mod navigation_routes;
mod route_table_routes;
mod user_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(navigation_routes::routes())
        .merge(route_table_routes::routes())
        .merge(user_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .with_state(state)
}
