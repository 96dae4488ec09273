use super::types::*;
use crate::{Error, Result, config::GeminiConfig};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Whether a credential is available. Checked before any call is attempted.
    fn has_credential(&self) -> bool;

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Sends a caller-built payload as-is and hands back status and body untouched.
    async fn forward(&self, model: &str, payload: &Value) -> Result<ForwardedResponse>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingCredential)
    }

    async fn post(&self, model: &str, body: &impl serde::Serialize) -> Result<(u16, String)> {
        let api_key = self.api_key()?;
        let url = self.endpoint(model);

        debug!("Sending generateContent request to model {}", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!("Gemini responded with status {} ({} bytes)", status, text.len());

        Ok((status, text))
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw text.
fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.describe(),
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => truncate(body, 500),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let (status, body) = self.post(model, request).await?;

        if !(200..300).contains(&status) {
            let message = upstream_message(&body);
            warn!("Gemini returned status {}: {}", status, message);
            return Err(Error::Upstream { status, message });
        }

        let response: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            Error::malformed(format!("response is not a generateContent reply: {}", e))
        })?;

        if let Some(error) = &response.error {
            return Err(Error::Upstream {
                status: error.code.unwrap_or(status),
                message: error.describe(),
            });
        }

        Ok(response)
    }

    async fn forward(&self, model: &str, payload: &Value) -> Result<ForwardedResponse> {
        let (status, body) = self.post(model, payload).await?;

        let body = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        Ok(ForwardedResponse { status, body })
    }
}
