use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `/api/analyze-size` and `/api/generate-try-on`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported with the same message as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ProductImageRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StyleAnalysisRequest {
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error plus a value shaped like the success body, so the UI can still render.
#[derive(Debug, Serialize)]
pub struct FallbackResponse<T> {
    pub error: String,
    pub details: String,
    #[serde(flatten)]
    pub value: T,
}

#[derive(Debug, Serialize)]
pub struct DetailedErrorResponse {
    pub error: String,
    pub details: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub credential_configured: bool,
    pub try_on_mode: &'static str,
}
