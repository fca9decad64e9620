use std::collections::BTreeMap;

use serde::Serialize;

/// Where a redirect sends the user: a route name plus optional query parameters.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub name: String,
    pub query: BTreeMap<String, String>,
}

impl RedirectTarget {
    pub fn to(name: &str) -> Self {
        RedirectTarget {
            name: name.to_string(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }
}

/// The single decision a guard hands back for a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Proceed,
    Redirect(RedirectTarget),
}

impl NavigationOutcome {
    pub fn redirect(name: &str) -> Self {
        NavigationOutcome::Redirect(RedirectTarget::to(name))
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationOutcome::Proceed => "proceed",
            NavigationOutcome::Redirect(_) => "redirect",
        }
    }
}
