use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server Configuration Error: API Key missing")]
    MissingCredential,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The caller sent something it can correct and retry.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    /// The server is missing configuration; retrying will not help.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::Config(_))
    }

    /// Everything else happened while reaching or interpreting the provider.
    pub fn is_upstream_fault(&self) -> bool {
        !self.is_client_fault() && !self.is_configuration_fault()
    }
}
