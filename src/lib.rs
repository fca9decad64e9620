//! Library exports for navguard, shared between the binary and tests.

pub mod api;
pub mod config;
pub mod guard;
pub mod metrics;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod routing;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
