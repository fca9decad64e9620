use async_trait::async_trait;

use super::client::{ApiError, GraphQLClient};
use crate::models::Role;
use crate::session::SessionState;

/// Fetches the current user's role. Implementations must not serve cached
/// answers across navigations.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    async fn current_role(&self, session: &SessionState) -> Result<Option<Role>, ApiError>;
}

#[async_trait]
impl RoleLookup for GraphQLClient {
    async fn current_role(&self, session: &SessionState) -> Result<Option<Role>, ApiError> {
        self.current_user_role(session.token()).await
    }
}
