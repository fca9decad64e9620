use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::session::SessionConfig;
use crate::api::ApiConfig;
use crate::guard::GuardConfig;
use crate::models::RouteDescriptor;
use crate::routing::default_routes;

/// Prefix for environment overrides, e.g. `NAVGUARD_API__URI`.
pub const ENV_PREFIX: &str = "NAVGUARD_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: upstream API, guard policy, session backend and the route table.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteDescriptor>,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Config {
    pub fn into_v1(self) -> ConfigV1 {
        // handle configuration migration between versions here when necessary
        match self {
            Config::ConfigV1(c) => c,
        }
    }
}

/// Load config from a YAML file, with `NAVGUARD_`-prefixed environment
/// variables layered on top (`__` separates nested keys).
pub fn load_config(path: &Path) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    Ok(figment.extract::<Config>()?.into_v1())
}

/// Parse a config from an in-memory YAML document.
pub fn parse_config(yaml: &str) -> Result<ConfigV1, figment::Error> {
    let config: Config = Figment::new().merge(Yaml::string(yaml)).extract()?;
    Ok(config.into_v1())
}

/// Render the JSON schema for the configuration.
pub fn render_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
