use async_trait::async_trait;
use atelier::{
    Error, Result,
    gemini::{ForwardedResponse, GenerateContentRequest, GenerateContentResponse, GenerativeClient},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// What the mock provider answers with. Errors are rebuilt on every call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(GenerateContentResponse),
    Upstream { status: u16, message: String },
    Malformed(String),
}

/// Deterministic provider that records every request it receives.
#[derive(Debug, Clone)]
pub struct MockGenerativeClient {
    pub credential: bool,
    pub reply: MockReply,
    pub forward_reply: ForwardedResponse,
    pub requests: Arc<Mutex<Vec<(String, GenerateContentRequest)>>>,
    pub forwarded: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self {
            credential: true,
            reply: MockReply::Response(GenerateContentResponse::default()),
            forward_reply: ForwardedResponse {
                status: 200,
                body: json!({}),
            },
            requests: Arc::new(Mutex::new(Vec::new())),
            forwarded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.reply = MockReply::Response(create_text_response(text));
        self
    }

    pub fn with_image(mut self, mime_type: &str, data: &str) -> Self {
        self.reply = MockReply::Response(create_image_response(mime_type, data));
        self
    }

    pub fn with_upstream_error(mut self, status: u16, message: &str) -> Self {
        self.reply = MockReply::Upstream {
            status,
            message: message.to_string(),
        };
        self
    }

    pub fn with_malformed(mut self, message: &str) -> Self {
        self.reply = MockReply::Malformed(message.to_string());
        self
    }

    pub fn with_forward_reply(mut self, status: u16, body: Value) -> Self {
        self.forward_reply = ForwardedResponse { status, body };
        self
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    pub fn get_requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len() + self.forwarded.lock().unwrap().len()
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));

        match &self.reply {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::Upstream { status, message } => Err(Error::Upstream {
                status: *status,
                message: message.clone(),
            }),
            MockReply::Malformed(message) => Err(Error::malformed(message.clone())),
        }
    }

    async fn forward(&self, model: &str, payload: &Value) -> Result<ForwardedResponse> {
        self.forwarded
            .lock()
            .unwrap()
            .push((model.to_string(), payload.clone()));

        match &self.reply {
            MockReply::Upstream { status, message } => Err(Error::Upstream {
                status: *status,
                message: message.clone(),
            }),
            _ => Ok(self.forward_reply.clone()),
        }
    }
}

pub fn create_text_response(text: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
    .unwrap()
}

pub fn create_image_response(mime_type: &str, data: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [
                { "inlineData": { "mimeType": mime_type, "data": data } }
            ] },
            "finishReason": "STOP"
        }]
    }))
    .unwrap()
}
