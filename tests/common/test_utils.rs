use super::mocks::MockGenerativeClient;
use atelier::{
    config::{Config, TryOnMode},
    gateway::Gateway,
    server::{self, handlers::AppState},
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;

/// A tiny JPEG header, base64. Enough for a provider mock; never decoded.
pub const SAMPLE_IMAGE: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8U";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.logs.level = "debug".to_string();
    config.gemini.api_key = Some("test-api-key".to_string());
    config
}

pub fn create_passthrough_config() -> Config {
    let mut config = create_test_config();
    config.try_on.mode = TryOnMode::Passthrough;
    config
}

/// Builds the full router around a mock provider.
pub fn create_test_app(client: MockGenerativeClient, config: &Config) -> Router {
    let gateway = Gateway::new(Arc::new(client), config).unwrap();
    let state = AppState {
        gateway: Arc::new(gateway),
    };
    server::router(state, &config.server)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 3000
  cors: false
  max_body_bytes: 1048576
  logs:
    level: "debug"

gemini:
  base_url: "http://localhost:9999/v1beta"
  api_key: "test-api-key"
  timeout_secs: 5

size_estimation:
  model: "gemini-2.5-flash"
  prompt: "Pick S, M, L, XL or XXL for a {product}. JSON only."

try_on:
  mode: passthrough
  model: "gemini-2.5-flash-image"

style_analysis:
  model: "gemini-2.5-flash-preview-09-2025"
"#;
