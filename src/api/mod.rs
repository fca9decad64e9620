//! GraphQL client for the dating-app API.

mod client;
mod current_user;
pub mod queries;
mod role;

pub use client::{authorization_header, ApiConfig, ApiError, GraphQLClient};
pub use role::RoleLookup;
