//! Query documents sent to the API.

/// Just the role, fetched before privileged navigations.
pub const CURRENT_USER_ROLE: &str = r#"
  query {
    currentUser {
      role
    }
  }
"#;

/// The full profile of the signed-in user.
pub const CURRENT_USER: &str = r#"
  query {
    currentUser {
      id
      email
      firstName
      lastName
      bio
      city
      photos {
        id
        url
        position
        isPrimary
      }
      role
    }
  }
"#;
