pub mod base;
pub mod bearer;
pub mod file_store;
pub mod memory_store;
pub mod state;

// Re-export the primary session items so code outside can do
// "use crate::session::{TokenStore, SessionState};"
pub use base::{create_token_store, StoreError, TokenStore, TOKEN_KEY};
pub use bearer::BearerSession;
pub use state::SessionState;
