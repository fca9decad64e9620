use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::api::RoleLookup;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::Role;
use crate::session::SessionState;
use crate::utils::log_throttle::LogThrottle;

const LOOKUP_FAILED: &str = "guard.role_lookup.failed";

/// Role resolution for one navigation.
///
/// The first caller triggers a network lookup; later guard invocations in
/// the same navigation (a redirect chain) reuse its answer. Dropped when the
/// navigation ends, so nothing outlives it.
pub struct RoleScope<'a> {
    lookup: &'a dyn RoleLookup,
    session: &'a SessionState,
    metrics: &'a Metrics,
    throttle: &'a LogThrottle,
    resolved: OnceCell<Option<Role>>,
}

impl<'a> RoleScope<'a> {
    pub(super) fn new(
        lookup: &'a dyn RoleLookup,
        session: &'a SessionState,
        metrics: &'a Metrics,
        throttle: &'a LogThrottle,
    ) -> Self {
        RoleScope {
            lookup,
            session,
            metrics,
            throttle,
            resolved: OnceCell::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        self.session
    }

    /// The user's role, or `None` if it is unknown for any reason.
    pub async fn role(&self) -> Option<Role> {
        self.resolved.get_or_init(|| self.fetch()).await.clone()
    }

    async fn fetch(&self) -> Option<Role> {
        let started = Instant::now();
        let result = self.lookup.current_role(self.session).await;
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Ok(role) => {
                self.metrics.record_role_lookup("ok");
                self.metrics.record_role_lookup_duration(elapsed, "ok");
                debug!(
                    role = role.as_ref().map_or("<none>", Role::as_str),
                    "Resolved user role"
                );
                role
            }
            Err(e) => {
                self.metrics.record_role_lookup("error");
                self.metrics.record_role_lookup_duration(elapsed, "error");
                if let Some(suppressed_count) = self.throttle.should_emit(LOOKUP_FAILED) {
                    warn!(
                        event_name = LOOKUP_FAILED,
                        suppressed_count,
                        "Error fetching user role, treating it as unknown: {}",
                        e
                    );
                }
                None
            }
        }
    }
}
