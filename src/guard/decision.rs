//! The guard's decision table, free of I/O.
//!
//! Rules, first match wins:
//!
//! 1. protected target, no token: go to login, remembering the target.
//! 2. admin target, token, role is not admin: go to the deck.
//! 3. protected target, token, otherwise: proceed.
//! 4. entry page (login/register/home), token: admins go to the admin page,
//!    everyone else to the deck.
//! 5. anything else: proceed.
//!
//! `requires_admin` on a route that does not also require auth is ignored.
//! An unknown role, whether the lookup failed or the user has none, never
//! counts as admin.

use super::GuardConfig;
use crate::models::{NavigationOutcome, RedirectTarget, Role, RouteLocation};
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

impl From<&SessionState> for AuthState {
    fn from(session: &SessionState) -> Self {
        if session.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }
}

/// Which role-dependent rule is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCheck {
    /// Rules 2 and 3 for an admin-only target.
    AdminOnly,
    /// Rule 4.
    EntryBounce,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Decided(NavigationOutcome),
    NeedsRole(RoleCheck),
}

/// Apply every rule that does not need the user's role.
pub fn classify(config: &GuardConfig, target: &RouteLocation, auth: AuthState) -> Classification {
    if target.meta.requires_auth {
        return match auth {
            AuthState::Anonymous => Classification::Decided(NavigationOutcome::Redirect(
                RedirectTarget::to(&config.login_route)
                    .with_query(&config.redirect_query, &target.full_path),
            )),
            AuthState::Authenticated if target.meta.requires_admin => {
                Classification::NeedsRole(RoleCheck::AdminOnly)
            }
            AuthState::Authenticated => Classification::Decided(NavigationOutcome::Proceed),
        };
    }

    let is_entry = target
        .name
        .as_deref()
        .map_or(false, |name| config.is_entry_route(name));
    if auth == AuthState::Authenticated && is_entry {
        Classification::NeedsRole(RoleCheck::EntryBounce)
    } else {
        Classification::Decided(NavigationOutcome::Proceed)
    }
}

/// Finish a pending rule once the role is known (`None` = unknown).
pub fn settle(config: &GuardConfig, check: RoleCheck, role: Option<&Role>) -> NavigationOutcome {
    let is_admin = role.map_or(false, |r| r.as_str() == config.admin_role);
    match (check, is_admin) {
        (RoleCheck::AdminOnly, true) => NavigationOutcome::Proceed,
        (RoleCheck::AdminOnly, false) => NavigationOutcome::redirect(&config.deck_route),
        (RoleCheck::EntryBounce, true) => NavigationOutcome::redirect(&config.admin_route),
        (RoleCheck::EntryBounce, false) => NavigationOutcome::redirect(&config.deck_route),
    }
}

/// The whole table in one call, for callers that already know the role.
pub fn decide(
    config: &GuardConfig,
    target: &RouteLocation,
    auth: AuthState,
    role: Option<&Role>,
) -> NavigationOutcome {
    match classify(config, target, auth) {
        Classification::Decided(outcome) => outcome,
        Classification::NeedsRole(check) => settle(config, check, role),
    }
}
