use serde::Deserialize;

use super::client::{ApiError, GraphQLClient};
use super::queries::{CURRENT_USER, CURRENT_USER_ROLE};
use crate::models::{CurrentUser, Role};

#[derive(Deserialize)]
struct RoleOnly {
    role: Option<String>,
}

#[derive(Deserialize)]
struct CurrentUserData<T> {
    #[serde(rename = "currentUser")]
    current_user: Option<T>,
}

impl GraphQLClient {
    /// The signed-in user's role. `Ok(None)` when the API knows no user or
    /// reports no role.
    pub async fn current_user_role(&self, token: Option<&str>) -> Result<Option<Role>, ApiError> {
        let data: CurrentUserData<RoleOnly> = self.execute(CURRENT_USER_ROLE, token).await?;
        Ok(data
            .current_user
            .and_then(|user| Role::from_reported(user.role)))
    }

    /// The signed-in user's profile. Skipped entirely without a token.
    pub async fn current_user(&self, token: Option<&str>) -> Result<Option<CurrentUser>, ApiError> {
        if token.is_none() {
            return Ok(None);
        }
        let data: CurrentUserData<CurrentUser> = self.execute(CURRENT_USER, token).await?;
        Ok(data.current_user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use mockito::{Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> GraphQLClient {
        GraphQLClient::new(&ApiConfig {
            uri: format!("{}/graphql", server.url()),
            timeout_in_ms: 2000,
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn role_is_read_from_current_user() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data": {"currentUser": {"role": "admin"}}}"#)
            .create_async()
            .await;

        let role = client_for(&server).current_user_role(Some("abc")).await.unwrap();
        m.assert_async().await;
        assert_eq!(role, Some(Role::new("admin")));
    }

    #[tokio::test]
    async fn missing_user_or_role_is_none() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data": {"currentUser": null}}"#)
            .create_async()
            .await;
        assert_eq!(
            client_for(&server).current_user_role(Some("abc")).await.unwrap(),
            None
        );

        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data": {"currentUser": {"role": null}}}"#)
            .create_async()
            .await;
        assert_eq!(
            client_for(&server).current_user_role(Some("abc")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn profile_query_is_skipped_without_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/graphql")
            .expect(0)
            .create_async()
            .await;

        let user = client_for(&server).current_user(None).await.unwrap();
        m.assert_async().await;
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn profile_query_returns_user() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_body(
                r#"{"data": {"currentUser": {
                    "id": "7", "email": "kai@example.com", "firstName": "Kai",
                    "lastName": null, "bio": null, "city": null,
                    "photos": [], "role": "user"}}}"#,
            )
            .create_async()
            .await;

        let user = client_for(&server)
            .current_user(Some("abc"))
            .await
            .unwrap()
            .expect("user present");
        assert_eq!(user.id, "7");
        assert_eq!(user.role(), Some(Role::new("user")));
    }
}
