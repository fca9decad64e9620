use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::SessionConfig;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not a JSON object of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("session store '{0}' is read-only")]
    ReadOnly(String),
}

/// A string key-value store holding session state.
///
/// The guard only ever reads from it; writes come from login/logout flows.
#[async_trait]
pub trait TokenStore: Send + Sync {
    fn get_name(&self) -> &str;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Creates a concrete store implementation based on the SessionConfig.
pub fn create_token_store(config: &SessionConfig) -> Arc<dyn TokenStore> {
    match config {
        SessionConfig::Memory => {
            info!("Using in-memory session store.");
            Arc::new(MemoryStore::new())
        }
        SessionConfig::File(file) => {
            info!("Using file session store at {}", file.path.display());
            Arc::new(FileStore::new(file.path.clone()))
        }
    }
}
