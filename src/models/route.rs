use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Access requirements declared on a route. Both flags default to `false`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
pub struct RouteMeta {
    #[serde(default, alias = "requiresAuth")]
    pub requires_auth: bool,
    /// Only consulted when `requires_auth` is also set.
    #[serde(default, alias = "requiresAdmin")]
    pub requires_admin: bool,
}

/// Static description of one navigable path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct RouteDescriptor {
    pub name: String,
    /// Path pattern; `:name` segments capture one path segment.
    pub path: String,
    /// Opaque reference to the view rendered for this route.
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(name: &str, path: &str, component: &str, meta: RouteMeta) -> Self {
        RouteDescriptor {
            name: name.to_string(),
            path: path.to_string(),
            component: component.to_string(),
            meta,
        }
    }
}

/// A concrete path resolved against the route table.
///
/// Paths that match no descriptor resolve to an unnamed location carrying
/// default (public) metadata.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
    pub name: Option<String>,
    pub path: String,
    /// `path` followed by the rendered query string, if any.
    pub full_path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub meta: RouteMeta,
}

impl RouteLocation {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Route name for logs and metric labels.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unmatched")
    }
}
