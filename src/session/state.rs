use tracing::warn;

use super::{TokenStore, TOKEN_KEY};

/// Snapshot of the session taken at the start of a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Option<String>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An empty token is no token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        SessionState {
            token: (!token.is_empty()).then_some(token),
        }
    }

    /// Read the token from a store. A failed read means no token.
    pub async fn load(store: &dyn TokenStore) -> Self {
        match store.get(TOKEN_KEY).await {
            Ok(Some(token)) => Self::with_token(token),
            Ok(None) => Self::anonymous(),
            Err(e) => {
                warn!(
                    "Failed to read session token from '{}' store: {}",
                    store.get_name(),
                    e
                );
                Self::anonymous()
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
