//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! the route table, the guard, the API client and metrics.

use crate::api::GraphQLClient;
use crate::guard::RouteGuard;
use crate::metrics::Metrics;
use crate::routing::RouteTable;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable route table built from the configuration.
    pub table: Arc<RouteTable>,
    /// Guard deciding every navigation.
    pub guard: Arc<RouteGuard>,
    /// Upstream GraphQL API, used directly for profile lookups.
    pub api: Arc<GraphQLClient>,
    pub metrics: Metrics,
}
