mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let mut config = load_from(explicit_path.as_deref()).await?;
    apply_env_overrides(&mut config, |name| env::var(name).ok())?;
    Ok(config)
}

/// Reads the YAML file at `path`, or `config.yaml` when no path is given.
///
/// A missing default file is not an error: every field has a default, so the
/// service can run from environment variables alone. A missing file that was
/// asked for explicitly is.
pub async fn load_from(path: Option<&str>) -> Result<Config> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    if path.is_none() && !Path::new(config_path).exists() {
        debug!("No {} found, using built-in defaults", config_path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies `GEMINI_API_KEY` and `PORT` on top of the file configuration.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
        debug!("Using Gemini API key from environment");
        config.gemini.api_key = Some(key);
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    // An empty key in YAML is the same as no key at all.
    if config
        .gemini
        .api_key
        .as_deref()
        .is_some_and(|k| k.trim().is_empty())
    {
        config.gemini.api_key = None;
    }

    Ok(())
}
