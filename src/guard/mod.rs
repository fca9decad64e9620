//! Navigation authorization.
//!
//! [`decision`] holds the pure decision table; [`RouteGuard`] wires it to a
//! role lookup that runs only when the table needs a role.

mod config;
pub mod decision;
mod role_scope;
mod route_guard;
#[cfg(test)]
pub(crate) mod testing;

pub use config::GuardConfig;
pub use decision::{classify, decide, settle, AuthState, Classification, RoleCheck};
pub use role_scope::RoleScope;
pub use route_guard::{NavigationRequest, RouteGuard};
