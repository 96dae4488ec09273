use crate::{Error, Result};

const PRODUCT_PLACEHOLDER: &str = "{product}";

pub const SIZE_ESTIMATION_PROMPT: &str = r#"You are an expert luxury fashion tailor. Analyze the person in this image.
Task: Estimate their clothing size (S, M, L, XL, XXL) for a "{product}".
Look at shoulder width, chest volume, and overall build.

Return ONLY valid JSON with no markdown formatting:
{
  "body_type": "Short description (e.g. Athletic, Slim, Curvy)",
  "recommended_size": "S, M, L, XL, or XXL",
  "reasoning": "A polite, professional visual explanation in one sentence."
}"#;

pub const TRY_ON_PROMPT: &str = r#"Generate a photorealistic high-fashion lookbook image based on the provided input image.
The person in the image should be wearing a {product}.
Maintain the exact pose, face, skin tone, and body shape of the person in the input image.
Only change their clothing to the requested item.
The background should be clean and luxurious."#;

/// An instruction with a `{product}` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !text.contains(PRODUCT_PLACEHOLDER) {
            return Err(Error::config(format!(
                "Prompt template must contain the {} placeholder",
                PRODUCT_PLACEHOLDER
            )));
        }
        Ok(Self { text })
    }

    /// Uses `custom` when configured, `default` otherwise.
    pub fn from_config(custom: Option<&str>, default: &str) -> Result<Self> {
        Self::new(custom.unwrap_or(default))
    }

    pub fn render(&self, product: &str) -> String {
        self.text.replace(PRODUCT_PLACEHOLDER, product.trim())
    }
}
