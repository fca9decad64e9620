use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Where the GraphQL API lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            uri: default_uri(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

fn default_uri() -> String {
    "http://localhost:3000/graphql".to_string()
}

fn default_timeout_in_ms() -> u64 {
    5000
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    Status(StatusCode),
    #[error("graphql errors: {0}")]
    GraphQL(String),
    #[error("response carried no data")]
    MissingData,
    #[error("error parsing response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

/// `Bearer <token>` when signed in, an empty value otherwise.
pub fn authorization_header(token: Option<&str>) -> String {
    match token {
        Some(token) => format!("Bearer {}", token),
        None => String::new(),
    }
}

/// Sends queries over HTTP POST. Responses are never cached: every call
/// goes to the network.
pub struct GraphQLClient {
    http: reqwest::Client,
    uri: String,
}

impl GraphQLClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()?;
        Ok(GraphQLClient {
            http,
            uri: config.uri.clone(),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Run `query` and decode its `data` member.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        debug!("Sending GraphQL request to: {}", self.uri);
        let response = self
            .http
            .post(&self.uri)
            .header(AUTHORIZATION, authorization_header(token))
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        let envelope: GraphQLResponse<T> = serde_json::from_str(&body)?;
        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQL(messages.join("; ")));
        }
        envelope.data.ok_or(ApiError::MissingData)
    }
}
