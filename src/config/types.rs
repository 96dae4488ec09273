use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub size_estimation: SizeEstimationConfig,
    #[serde(default)]
    pub try_on: TryOnConfig,
    #[serde(default)]
    pub style_analysis: StyleAnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_cors")]
    pub cors: bool,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Overridden by `GEMINI_API_KEY` when that is set.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeEstimationConfig {
    #[serde(default = "default_size_model")]
    pub model: String,
    /// Replaces the built-in tailor instruction. Must contain `{product}`.
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnConfig {
    #[serde(default)]
    pub mode: TryOnMode,
    #[serde(default = "default_try_on_model")]
    pub model: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleAnalysisConfig {
    #[serde(default = "default_style_model")]
    pub model: String,
}

/// How the try-on endpoint produces its image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TryOnMode {
    /// Ask an image-capable model to render the garment on the person.
    #[default]
    Generate,
    /// Skip the provider and hand the original photo back, labelled as such.
    Passthrough,
}

impl TryOnMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Passthrough => "passthrough",
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            cors: default_cors(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SizeEstimationConfig {
    fn default() -> Self {
        Self {
            model: default_size_model(),
            prompt: None,
        }
    }
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            mode: TryOnMode::default(),
            model: default_try_on_model(),
            prompt: None,
        }
    }
}

impl Default for StyleAnalysisConfig {
    fn default() -> Self {
        Self {
            model: default_style_model(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_size_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_try_on_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_style_model() -> String {
    "gemini-2.5-flash-preview-09-2025".to_string()
}
