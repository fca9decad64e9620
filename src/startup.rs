//! Application startup and server initialization.
//!
//! Builds the route table, API client and guard from the configuration,
//! checks that every redirect target exists, and serves the HTTP routes.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{ApiError, GraphQLClient};
use crate::config::ConfigV1;
use crate::guard::RouteGuard;
use crate::metrics::Metrics;
use crate::routes;
use crate::routing::{RouteError, RouteTable};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteError),
    #[error("could not build API client: {0}")]
    Api(#[from] ApiError),
    #[error("could not bind to {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Assemble the shared state. Fails if the route table is malformed or a
/// guard redirect target names a route that does not exist.
pub fn build_state(config: ConfigV1) -> Result<AppState, StartupError> {
    let table = RouteTable::new(config.routes)?;
    table.validate_targets(config.guard.redirect_targets())?;
    info!("Loaded route table with {} routes", table.descriptors().count());

    let api = Arc::new(GraphQLClient::new(&config.api)?);
    info!("Role lookups go to {}", api.uri());

    let metrics = Metrics::new();
    let guard = Arc::new(RouteGuard::new(
        config.guard,
        api.clone(),
        metrics.clone(),
    ));

    Ok(AppState {
        table: Arc::new(table),
        guard,
        api,
        metrics,
    })
}

/// Initializes and runs the HTTP server until it fails.
pub async fn run(config: ConfigV1) -> Result<(), StartupError> {
    let bind_address = config.bind_address.clone();
    let state = build_state(config)?;
    let app = routes::create_router(state);

    info!("Starting server on {}", bind_address);
    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    axum::serve(listener, app).await?;
    Ok(())
}
