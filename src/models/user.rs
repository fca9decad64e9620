use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A server-asserted privilege label such as `"admin"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Role(role.into())
    }

    /// An empty role string carries no privilege and is treated as absent.
    pub fn from_reported(role: Option<String>) -> Option<Self> {
        role.filter(|r| !r.is_empty()).map(Role)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Profile of the signed-in user as reported by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CurrentUser {
    pub fn role(&self) -> Option<Role> {
        Role::from_reported(self.role.clone())
    }

    pub fn primary_photo(&self) -> Option<&Photo> {
        self.photos
            .iter()
            .find(|p| p.is_primary)
            .or_else(|| self.photos.iter().min_by_key(|p| p.position.unwrap_or(i32::MAX)))
    }
}
