use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::guard::{NavigationRequest, RouteGuard};
use crate::models::{NavigationOutcome, RouteLocation};
use crate::routing::{RouteError, RouteTable};
use crate::session::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation to '{0}' was superseded by a newer navigation")]
    Superseded(String),
    #[error("more than {limit} redirects while navigating to '{start}'")]
    RedirectLoop { start: String, limit: usize },
    #[error("redirect target is not routable: {0}")]
    Route(#[from] RouteError),
}

/// Where a navigation finally landed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub location: RouteLocation,
    /// Full path originally requested, when the guard redirected away from it.
    pub redirected_from: Option<String>,
    pub redirects: usize,
}

/// Run the guard on `start`, following redirects until a target is allowed.
///
/// Every hop shares one role scope, so a chain such as
/// `/login -> /admin` costs a single role lookup.
pub async fn resolve_chain(
    guard: &RouteGuard,
    table: &RouteTable,
    session: &SessionState,
    from: Option<&RouteLocation>,
    start: RouteLocation,
) -> Result<Resolution, NavigationError> {
    let scope = guard.scope(session);
    let limit = guard.config().max_redirects;
    let requested = start.full_path.clone();
    let mut target = start;
    let mut redirects = 0;

    loop {
        let request = NavigationRequest { to: &target, from };
        match guard.evaluate(request, &scope).await {
            NavigationOutcome::Proceed => {
                return Ok(Resolution {
                    location: target,
                    redirected_from: (redirects > 0).then_some(requested),
                    redirects,
                })
            }
            NavigationOutcome::Redirect(redirect) => {
                if redirects == limit {
                    return Err(NavigationError::RedirectLoop {
                        start: requested,
                        limit,
                    });
                }
                redirects += 1;
                debug!(
                    "Redirecting '{}' to route '{}'",
                    target.full_path, redirect.name
                );
                target = table.resolve_named(&redirect.name, &BTreeMap::new(), redirect.query)?;
            }
        }
    }
}
