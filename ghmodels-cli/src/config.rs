//! Configuration for the ghmodels CLI.
//!
//! Settings are resolved in this order, later wins:
//! 1. Built-in defaults
//! 2. Optional TOML file passed with `--config`
//! 3. Command-line flags / environment variables

use std::path::Path;

use ghmodels::config::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Contents of the optional TOML config file.
///
/// ```toml
/// endpoint = "https://models.github.ai/inference"
/// model = "microsoft/Phi-4-multimodal-instruct"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Inference endpoint base URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Default model identifier.
    #[serde(default)]
    pub model: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parse from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file path.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Merge defaults, file settings and flag overrides into a client config.
#[must_use]
pub fn resolve(
    file: FileConfig,
    endpoint: Option<String>,
    model: Option<String>,
) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(endpoint) = endpoint.or(file.endpoint) {
        config = config.with_endpoint(endpoint);
    }
    if let Some(model) = model.or(file.model) {
        config = config.with_model(model);
    }
    if let Some(secs) = file.timeout_secs {
        config = config.with_timeout(secs);
    }
    config
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file() {
        let file = FileConfig::parse(
            r#"
            endpoint = "http://localhost:8080"
            model = "openai/gpt-4o-mini"
            timeout_secs = 15
            "#,
        )
        .unwrap();

        let config = resolve(file.clone(), None, Some("meta/Llama-3.2-11B-Vision-Instruct".into()));
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.model, "meta/Llama-3.2-11B-Vision-Instruct");
        assert_eq!(config.timeout_secs, Some(15));

        let config = resolve(file, Some("http://other".into()), None);
        assert_eq!(config.endpoint, "http://other");
        assert_eq!(config.model, "openai/gpt-4o-mini");
    }

    #[test]
    fn empty_file_keeps_defaults() {
        let config = resolve(FileConfig::parse("").unwrap(), None, None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            FileConfig::parse("token = \"ghp_nope\""),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
