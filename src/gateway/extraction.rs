use super::prompt::{PromptTemplate, SIZE_ESTIMATION_PROMPT, TRY_ON_PROMPT};
use super::sanitize::strip_code_fences;
use super::types::*;
use crate::{
    Error, Result,
    config::{Config, TryOnMode},
    gemini::{
        Content, ForwardedResponse, GenerateContentRequest, GenerationConfig, GenerativeClient,
        InlineData, Part,
    },
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const PASSTHROUGH_NOTE: &str = "Image generation is disabled; returning the original image.";
pub const TRY_ON_FALLBACK_NOTE: &str =
    "Try-on generation failed; returning the original image unchanged.";

/// What came back from the provider after unwrapping its envelope.
#[derive(Debug)]
enum Payload {
    Text(String),
    Image(InlineData),
}

/// Turns an image plus a product label into a structured answer from the provider.
///
/// Holds no per-request state; one instance is shared by every handler.
pub struct Gateway {
    client: Arc<dyn GenerativeClient>,
    size: Profile,
    try_on: Profile,
    try_on_mode: TryOnMode,
    style_model: String,
}

impl Gateway {
    pub fn new(client: Arc<dyn GenerativeClient>, config: &Config) -> Result<Self> {
        let size = Profile {
            model: config.size_estimation.model.clone(),
            modality: Modality::Json,
            template: PromptTemplate::from_config(
                config.size_estimation.prompt.as_deref(),
                SIZE_ESTIMATION_PROMPT,
            )?,
        };

        let try_on = Profile {
            model: config.try_on.model.clone(),
            modality: Modality::Image,
            template: PromptTemplate::from_config(config.try_on.prompt.as_deref(), TRY_ON_PROMPT)?,
        };

        info!(
            "Gateway ready: size model {}, try-on {} via {}, credential configured: {}",
            size.model,
            config.try_on.mode.as_str(),
            try_on.model,
            client.has_credential()
        );

        Ok(Self {
            client,
            size,
            try_on,
            try_on_mode: config.try_on.mode,
            style_model: config.style_analysis.model.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.client.has_credential()
    }

    pub fn try_on_mode(&self) -> TryOnMode {
        self.try_on_mode
    }

    /// Estimates a clothing size for the person in the photo.
    ///
    /// Only client and configuration faults are returned as errors. Anything
    /// that goes wrong with the provider yields [`SizeEstimate::fallback`].
    pub async fn estimate(&self, request: &ProductImage) -> Result<Extraction<SizeEstimate>> {
        self.require_credential()?;

        let outcome = match self.submit(&self.size, request).await {
            Ok(payload) => parse_estimate(payload),
            Err(e) => Err(e),
        };

        settle(outcome, SizeEstimate::fallback, "size estimation")
    }

    /// Renders the product onto the person, or hands the photo back when
    /// generation is disabled or fails. `mode` in the result says which.
    pub async fn generate_try_on(&self, request: &ProductImage) -> Result<Extraction<TryOnImage>> {
        if self.try_on_mode == TryOnMode::Passthrough {
            debug!("Try-on generation disabled, returning original image");
            return Ok(Extraction::Extracted(TryOnImage::passthrough(
                &request.image,
                PASSTHROUGH_NOTE,
            )));
        }

        self.require_credential()?;

        let outcome = match self.submit(&self.try_on, request).await {
            Ok(Payload::Image(data)) => Ok(TryOnImage::generated(&InlineImage {
                mime_type: data.mime_type,
                data: data.data,
            })),
            Ok(Payload::Text(text)) => Err(Error::malformed(format!(
                "expected an image, model replied with text: {}",
                text.trim()
            ))),
            Err(e) => Err(e),
        };

        settle(
            outcome,
            || TryOnImage::passthrough(&request.image, TRY_ON_FALLBACK_NOTE),
            "try-on generation",
        )
    }

    /// Forwards a caller-built `generateContent` payload to the style model.
    pub async fn analyze_style(&self, payload: &Value) -> Result<ForwardedResponse> {
        if !payload.is_object() {
            return Err(Error::invalid_request("Missing payload"));
        }
        self.require_credential()?;

        debug!("Forwarding style analysis payload to {}", self.style_model);
        self.client.forward(&self.style_model, payload).await
    }

    fn require_credential(&self) -> Result<()> {
        if self.client.has_credential() {
            Ok(())
        } else {
            Err(Error::MissingCredential)
        }
    }

    async fn submit(&self, profile: &Profile, request: &ProductImage) -> Result<Payload> {
        let generation_config = match profile.modality {
            Modality::Json => GenerationConfig::json(),
            Modality::Image => GenerationConfig::image(),
        };

        let body = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(profile.template.render(&request.product)),
                Part::inline(&request.image.mime_type, &request.image.data),
            ])],
            generation_config: Some(generation_config),
        };

        debug!(
            "Submitting {:?} request for product '{}' to {}",
            profile.modality, request.product, profile.model
        );

        let response = self.client.generate_content(&profile.model, &body).await?;

        let payload = match profile.modality {
            Modality::Image => response.inline_image().cloned().map(Payload::Image),
            Modality::Json => None,
        };

        payload
            .or_else(|| response.text().map(Payload::Text))
            .ok_or_else(|| Error::malformed(response.describe_absence()))
    }
}

fn parse_estimate(payload: Payload) -> Result<SizeEstimate> {
    match payload {
        Payload::Text(text) => Ok(serde_json::from_str(strip_code_fences(&text))?),
        Payload::Image(_) => Err(Error::malformed("expected JSON text, model replied with an image")),
    }
}

/// Keeps client and configuration faults, swaps every other failure for a fallback.
fn settle<T>(
    outcome: Result<T>,
    fallback: impl FnOnce() -> T,
    task: &str,
) -> Result<Extraction<T>> {
    match outcome {
        Ok(value) => Ok(Extraction::Extracted(value)),
        Err(cause) if cause.is_upstream_fault() => {
            warn!("{} failed, serving fallback: {}", task, cause);
            Ok(Extraction::Fallback {
                value: fallback(),
                cause,
            })
        }
        Err(cause) => Err(cause),
    }
}
