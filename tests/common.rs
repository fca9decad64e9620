#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use navguard::config::{parse_config, ConfigV1};
use navguard::routes::create_router;
use navguard::startup::build_state;
use serde_json::Value;

/// Config with the default route table and the API pointed at `api_uri`.
pub fn test_config(api_uri: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "json"
api:
  uri: "{}/graphql"
  timeout_in_ms: 2000
bind_address: 127.0.0.1:0
"#,
        api_uri
    );
    parse_config(&yaml).expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    let state = build_state(config).expect("test state builds");
    create_router(state)
}

pub fn request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// GraphQL body answering the role query.
pub fn role_body(role: &str) -> String {
    format!(r#"{{"data": {{"currentUser": {{"role": "{}"}}}}}}"#, role)
}
