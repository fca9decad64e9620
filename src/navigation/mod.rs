//! Applying guard decisions: redirect chains and the committed location.

mod chain;
mod navigator;

pub use chain::{resolve_chain, NavigationError, Resolution};
pub use navigator::Navigator;
