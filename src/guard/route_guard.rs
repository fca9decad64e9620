use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::decision::{classify, settle, AuthState, Classification};
use super::{GuardConfig, RoleScope};
use crate::api::RoleLookup;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{NavigationOutcome, RouteLocation};
use crate::session::SessionState;
use crate::utils::log_throttle::LogThrottle;

const FAILURE_LOG_WINDOW: Duration = Duration::from_secs(30);

/// One navigation attempt: where the user wants to go and where they are.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest<'a> {
    pub to: &'a RouteLocation,
    pub from: Option<&'a RouteLocation>,
}

/// Runs before every navigation and returns exactly one decision.
///
/// Stateless across calls: the session comes in as an argument and the role
/// is looked up fresh (at most once per call) only when the decision table
/// needs it. The token store is never touched.
pub struct RouteGuard {
    config: GuardConfig,
    roles: Arc<dyn RoleLookup>,
    metrics: Metrics,
    throttle: LogThrottle,
}

impl RouteGuard {
    pub fn new(config: GuardConfig, roles: Arc<dyn RoleLookup>, metrics: Metrics) -> Self {
        RouteGuard {
            config,
            roles,
            metrics,
            throttle: LogThrottle::new(FAILURE_LOG_WINDOW),
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// A role scope for one navigation; share it across a redirect chain.
    pub fn scope<'a>(&'a self, session: &'a SessionState) -> RoleScope<'a> {
        RoleScope::new(self.roles.as_ref(), session, &self.metrics, &self.throttle)
    }

    /// Decide a single navigation with a fresh role scope.
    pub async fn before_each(
        &self,
        request: NavigationRequest<'_>,
        session: &SessionState,
    ) -> NavigationOutcome {
        let scope = self.scope(session);
        self.evaluate(request, &scope).await
    }

    /// Decide a navigation using (and possibly filling) `scope`.
    pub async fn evaluate(
        &self,
        request: NavigationRequest<'_>,
        scope: &RoleScope<'_>,
    ) -> NavigationOutcome {
        let auth = AuthState::from(scope.session());
        let outcome = match classify(&self.config, request.to, auth) {
            Classification::Decided(outcome) => outcome,
            Classification::NeedsRole(check) => {
                let role = scope.role().await;
                settle(&self.config, check, role.as_ref())
            }
        };

        self.metrics
            .record_navigation_decision(outcome.kind(), request.to.label());
        debug!(
            to = request.to.full_path.as_str(),
            from = request.from.map_or("<start>", |f| f.full_path.as_str()),
            authenticated = auth == AuthState::Authenticated,
            outcome = ?outcome,
            "Guard decision"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::testing::StubRoles;
    use crate::models::RedirectTarget;
    use crate::routing::{default_routes, RouteTable};

    fn guard(roles: Arc<StubRoles>) -> RouteGuard {
        RouteGuard::new(GuardConfig::default(), roles, Metrics::new())
    }

    async fn check(guard: &RouteGuard, path: &str, session: &SessionState) -> NavigationOutcome {
        let table = RouteTable::new(default_routes()).unwrap();
        let to = table.resolve(path);
        guard
            .before_each(NavigationRequest { to: &to, from: None }, session)
            .await
    }

    #[tokio::test]
    async fn admin_without_token_goes_to_login() {
        let roles = Arc::new(StubRoles::role("admin"));
        let outcome = check(&guard(roles.clone()), "/admin", &SessionState::anonymous()).await;

        assert_eq!(
            outcome,
            NavigationOutcome::Redirect(RedirectTarget::to("login").with_query("redirect", "/admin"))
        );
        assert_eq!(roles.calls(), 0);
    }

    #[tokio::test]
    async fn encoded_admin_path_is_still_guarded() {
        let roles = Arc::new(StubRoles::role("user"));
        let guard = guard(roles.clone());

        assert_eq!(
            check(&guard, "/%61dmin", &SessionState::anonymous()).await,
            NavigationOutcome::Redirect(
                RedirectTarget::to("login").with_query("redirect", "/%61dmin")
            )
        );
        assert_eq!(
            check(&guard, "/adm%69n", &SessionState::with_token("abc")).await,
            NavigationOutcome::redirect("deck")
        );
        assert_eq!(roles.calls(), 1);
    }

    #[tokio::test]
    async fn admin_with_user_role_goes_to_deck() {
        let roles = Arc::new(StubRoles::role("user"));
        let outcome = check(&guard(roles.clone()), "/admin", &SessionState::with_token("abc")).await;

        assert_eq!(outcome, NavigationOutcome::redirect("deck"));
        assert_eq!(roles.calls(), 1);
    }

    #[tokio::test]
    async fn admin_with_admin_role_proceeds() {
        let roles = Arc::new(StubRoles::role("admin"));
        let outcome = check(&guard(roles), "/admin", &SessionState::with_token("abc")).await;
        assert_eq!(outcome, NavigationOutcome::Proceed);
    }

    #[tokio::test]
    async fn login_with_admin_role_goes_to_admin() {
        let roles = Arc::new(StubRoles::role("admin"));
        let outcome = check(&guard(roles), "/login", &SessionState::with_token("abc")).await;
        assert_eq!(outcome, NavigationOutcome::redirect("admin"));
    }

    #[tokio::test]
    async fn register_without_token_proceeds() {
        let roles = Arc::new(StubRoles::role("admin"));
        let outcome = check(&guard(roles.clone()), "/register", &SessionState::anonymous()).await;
        assert_eq!(outcome, NavigationOutcome::Proceed);
        assert_eq!(roles.calls(), 0);
    }

    #[tokio::test]
    async fn deck_with_failing_lookup_proceeds_without_lookup() {
        let roles = Arc::new(StubRoles::failing());
        let outcome = check(&guard(roles.clone()), "/deck", &SessionState::with_token("abc")).await;
        assert_eq!(outcome, NavigationOutcome::Proceed);
        assert_eq!(roles.calls(), 0);
    }

    #[tokio::test]
    async fn failing_lookup_fails_closed() {
        let roles = Arc::new(StubRoles::failing());
        let guard = guard(roles.clone());
        let session = SessionState::with_token("abc");

        assert_eq!(
            check(&guard, "/admin", &session).await,
            NavigationOutcome::redirect("deck")
        );
        assert_eq!(
            check(&guard, "/", &session).await,
            NavigationOutcome::redirect("deck")
        );
        assert_eq!(roles.calls(), 2);
    }

    #[tokio::test]
    async fn scope_shares_one_lookup() {
        let roles = Arc::new(StubRoles::role("admin"));
        let guard = guard(roles.clone());
        let session = SessionState::with_token("abc");
        let table = RouteTable::new(default_routes()).unwrap();
        let login = table.resolve("/login");
        let admin = table.resolve("/admin");

        let scope = guard.scope(&session);
        let first = guard
            .evaluate(NavigationRequest { to: &login, from: None }, &scope)
            .await;
        let second = guard
            .evaluate(
                NavigationRequest {
                    to: &admin,
                    from: Some(&login),
                },
                &scope,
            )
            .await;

        assert_eq!(first, NavigationOutcome::redirect("admin"));
        assert_eq!(second, NavigationOutcome::Proceed);
        assert_eq!(roles.calls(), 1);
    }

    #[tokio::test]
    async fn separate_navigations_look_up_afresh() {
        let roles = Arc::new(StubRoles::role("admin"));
        let guard = guard(roles.clone());
        let session = SessionState::with_token("abc");

        check(&guard, "/admin", &session).await;
        check(&guard, "/admin", &session).await;
        assert_eq!(roles.calls(), 2);
    }
}
