use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Route names and role value the guard's decision table refers to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct GuardConfig {
    /// Where unauthenticated users are sent.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Default landing page for signed-in users.
    #[serde(default = "default_deck_route")]
    pub deck_route: String,
    /// Landing page for admins.
    #[serde(default = "default_admin_route")]
    pub admin_route: String,
    /// Public pages a signed-in user is bounced away from.
    #[serde(default = "default_entry_routes")]
    pub entry_routes: Vec<String>,
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Query parameter that carries the originally requested path to login.
    #[serde(default = "default_redirect_query")]
    pub redirect_query: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            login_route: default_login_route(),
            deck_route: default_deck_route(),
            admin_route: default_admin_route(),
            entry_routes: default_entry_routes(),
            admin_role: default_admin_role(),
            redirect_query: default_redirect_query(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl GuardConfig {
    /// Every route name the guard may redirect to.
    pub fn redirect_targets(&self) -> [&str; 3] {
        [
            self.login_route.as_str(),
            self.deck_route.as_str(),
            self.admin_route.as_str(),
        ]
    }

    pub fn is_entry_route(&self, name: &str) -> bool {
        self.entry_routes.iter().any(|r| r == name)
    }
}

fn default_login_route() -> String {
    "login".to_string()
}

fn default_deck_route() -> String {
    "deck".to_string()
}

fn default_admin_route() -> String {
    "admin".to_string()
}

fn default_entry_routes() -> Vec<String> {
    vec!["login".to_string(), "register".to_string(), "home".to_string()]
}

fn default_admin_role() -> String {
    "admin".to_string()
}

fn default_redirect_query() -> String {
    "redirect".to_string()
}

fn default_max_redirects() -> usize {
    10
}
