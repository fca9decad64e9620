use async_trait::async_trait;

use super::{StoreError, TokenStore, TOKEN_KEY};

/// Read-only session carried by an incoming `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Default)]
pub struct BearerSession {
    token: Option<String>,
}

impl BearerSession {
    /// Anything other than a well-formed bearer header yields an empty session.
    pub fn from_header(header: &str) -> Self {
        let parts: Vec<&str> = header.split_whitespace().collect();
        let token = match parts.as_slice() {
            [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Some(token.to_string()),
            _ => None,
        };
        BearerSession { token }
    }
}

#[async_trait]
impl TokenStore for BearerSession {
    fn get_name(&self) -> &str {
        "bearer-header"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if key == TOKEN_KEY {
            Ok(self.token.clone())
        } else {
            Ok(None)
        }
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::ReadOnly(self.get_name().to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::ReadOnly(self.get_name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_bearer_headers() {
        let session = BearerSession::from_header("Bearer abc");
        assert_eq!(session.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        let lower = BearerSession::from_header("bearer xyz");
        assert_eq!(lower.get(TOKEN_KEY).await.unwrap().as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn other_headers_are_anonymous() {
        for header in ["", "Bearer", "Basic dXNlcjpwdw==", "Bearer a b"] {
            let session = BearerSession::from_header(header);
            assert_eq!(session.get(TOKEN_KEY).await.unwrap(), None, "{header:?}");
        }
    }

    #[tokio::test]
    async fn writes_are_refused() {
        let session = BearerSession::from_header("Bearer abc");
        assert!(matches!(
            session.set(TOKEN_KEY, "other").await,
            Err(StoreError::ReadOnly(_))
        ));
    }
}
