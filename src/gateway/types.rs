use super::prompt::PromptTemplate;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MISSING_INPUT: &str = "Missing image or product data";

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// What the provider is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Json,
    Image,
}

/// Everything that differs between gateway tasks.
#[derive(Debug, Clone)]
pub struct Profile {
    pub model: String,
    pub modality: Modality,
    pub template: PromptTemplate,
}

/// Base64 image as uploaded by the client. The bytes are never decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    /// Accepts bare base64 or a `data:<mime>;base64,` URI.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        let (mime_type, data) = match raw
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
        {
            Some((mime, data)) if !mime.is_empty() => (mime.to_string(), data),
            Some((_, data)) => (DEFAULT_MIME_TYPE.to_string(), data),
            None => (DEFAULT_MIME_TYPE.to_string(), raw),
        };

        if data.is_empty() {
            return None;
        }

        Some(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A validated `{ image, product }` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub image: InlineImage,
    pub product: String,
}

impl ProductImage {
    pub fn from_parts(image: Option<&str>, product: Option<&str>) -> Result<Self> {
        let image = image.and_then(InlineImage::parse);
        let product = product.map(str::trim).filter(|p| !p.is_empty());

        match (image, product) {
            (Some(image), Some(product)) => Ok(Self {
                image,
                product: product.to_string(),
            }),
            _ => Err(Error::invalid_request(MISSING_INPUT)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Size {
    Small,
    Medium,
    Large,
    ExtraLarge,
    DoubleExtraLarge,
}

impl Size {
    pub const ALL: [Size; 5] = [
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::ExtraLarge,
        Size::DoubleExtraLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::ExtraLarge => "XL",
            Self::DoubleExtraLarge => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "S" | "SMALL" => Ok(Self::Small),
            "M" | "MEDIUM" | "MED" => Ok(Self::Medium),
            "L" | "LARGE" => Ok(Self::Large),
            "XL" | "XLARGE" | "EXTRALARGE" => Ok(Self::ExtraLarge),
            "XXL" | "2XL" | "XXLARGE" | "2XLARGE" | "EXTRAEXTRALARGE" | "DOUBLEEXTRALARGE" => {
                Ok(Self::DoubleExtraLarge)
            }
            _ => Err(format!(
                "recommended_size '{}' is not one of S, M, L, XL, XXL",
                s
            )),
        }
    }
}

impl TryFrom<String> for Size {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEstimate {
    pub body_type: String,
    pub recommended_size: Size,
    pub reasoning: String,
}

impl SizeEstimate {
    /// What the client shows when the provider cannot be used.
    pub fn fallback() -> Self {
        Self {
            body_type: "Standard".to_string(),
            recommended_size: Size::Medium,
            reasoning: "We encountered a connection issue, but Medium is our most popular fit."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Generated,
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOnImage {
    /// Self-contained `data:` URI.
    pub image: String,
    pub mode: ImageSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TryOnImage {
    pub fn generated(image: &InlineImage) -> Self {
        Self {
            image: image.to_data_uri(),
            mode: ImageSource::Generated,
            note: None,
        }
    }

    pub fn passthrough(original: &InlineImage, note: impl Into<String>) -> Self {
        Self {
            image: original.to_data_uri(),
            mode: ImageSource::Passthrough,
            note: Some(note.into()),
        }
    }
}

/// A gateway outcome that always carries a value of the success shape.
#[derive(Debug)]
pub enum Extraction<T> {
    Extracted(T),
    Fallback { value: T, cause: Error },
}

impl<T> Extraction<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Extracted(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Extracted(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
