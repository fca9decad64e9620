//! Decision properties checked over every route in the default table.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use navguard::api::{ApiError, RoleLookup};
use navguard::guard::{GuardConfig, NavigationRequest, RouteGuard};
use navguard::metrics::Metrics;
use navguard::models::{NavigationOutcome, RedirectTarget, Role, RouteLocation};
use navguard::routing::{default_routes, RouteTable};
use navguard::session::SessionState;

/// Answers every lookup the same way and counts calls.
struct FixedRole {
    role: Option<&'static str>,
    fail: bool,
    calls: AtomicUsize,
}

impl FixedRole {
    fn new(role: Option<&'static str>, fail: bool) -> Arc<Self> {
        Arc::new(FixedRole {
            role,
            fail,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl RoleLookup for FixedRole {
    async fn current_role(&self, _session: &SessionState) -> Result<Option<Role>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ApiError::MissingData)
        } else {
            Ok(self.role.map(Role::new))
        }
    }
}

/// Role answers the API might give, including failures.
fn role_answers() -> Vec<Arc<FixedRole>> {
    vec![
        FixedRole::new(Some("admin"), false),
        FixedRole::new(Some("user"), false),
        FixedRole::new(Some(""), false),
        FixedRole::new(None, false),
        FixedRole::new(None, true),
    ]
}

fn locations() -> (RouteTable, Vec<RouteLocation>) {
    let table = RouteTable::new(default_routes()).unwrap();
    let mut paths: Vec<String> = table
        .descriptors()
        .map(|d| d.path.replace(":matchId", "31"))
        .collect();
    paths.push("/deck?filter=nearby".to_string());
    paths.push("/unknown".to_string());
    let locations = paths.iter().map(|p| table.resolve(p)).collect();
    (table, locations)
}

async fn decide(lookup: Arc<FixedRole>, to: &RouteLocation, session: &SessionState) -> NavigationOutcome {
    let guard = RouteGuard::new(GuardConfig::default(), lookup, Metrics::new());
    guard
        .before_each(NavigationRequest { to, from: None }, session)
        .await
}

fn is_admin_answer(lookup: &FixedRole) -> bool {
    !lookup.fail && lookup.role == Some("admin")
}

#[tokio::test]
async fn protected_routes_without_token_go_to_login_with_full_path() {
    let (_, locations) = locations();
    for to in locations.iter().filter(|l| l.meta.requires_auth) {
        for lookup in role_answers() {
            let outcome = decide(lookup.clone(), to, &SessionState::anonymous()).await;
            assert_eq!(
                outcome,
                NavigationOutcome::Redirect(
                    RedirectTarget::to("login").with_query("redirect", &to.full_path)
                ),
                "{}",
                to.full_path
            );
            assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        }
    }
}

#[tokio::test]
async fn admin_routes_admit_only_confirmed_admins() {
    let (_, locations) = locations();
    let session = SessionState::with_token("abc");
    for to in locations.iter().filter(|l| l.meta.requires_admin) {
        for lookup in role_answers() {
            let outcome = decide(lookup.clone(), to, &session).await;
            let expected = if is_admin_answer(&lookup) {
                NavigationOutcome::Proceed
            } else {
                NavigationOutcome::redirect("deck")
            };
            assert_eq!(outcome, expected, "{} with {:?}", to.full_path, lookup.role);
            assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        }
    }
}

#[tokio::test]
async fn entry_routes_never_admit_signed_in_users() {
    let (_, locations) = locations();
    let session = SessionState::with_token("abc");
    let entries = ["home", "login", "register"];
    for to in locations
        .iter()
        .filter(|l| entries.iter().any(|e| l.is_named(e)))
    {
        for lookup in role_answers() {
            let outcome = decide(lookup.clone(), to, &session).await;
            let expected = if is_admin_answer(&lookup) { "admin" } else { "deck" };
            assert_eq!(outcome, NavigationOutcome::redirect(expected));
        }
    }
}

#[tokio::test]
async fn public_routes_admit_anonymous_users() {
    let (_, locations) = locations();
    for to in locations.iter().filter(|l| !l.meta.requires_auth) {
        for lookup in role_answers() {
            let outcome = decide(lookup.clone(), to, &SessionState::anonymous()).await;
            assert_eq!(outcome, NavigationOutcome::Proceed, "{}", to.full_path);
            assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        }
    }
}

#[tokio::test]
async fn lookups_happen_at_most_once_per_decision() {
    let (_, locations) = locations();
    let session = SessionState::with_token("abc");
    for to in &locations {
        let lookup = FixedRole::new(None, true);
        decide(lookup.clone(), to, &session).await;
        assert!(lookup.calls.load(Ordering::SeqCst) <= 1, "{}", to.full_path);
    }
}
