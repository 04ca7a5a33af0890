//! Client configuration and credentials.

use std::fmt;

use crate::error::{Error, Result};

/// Configuration for [`ModelsClient`](crate::client::ModelsClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the inference endpoint.
    pub endpoint: String,
    /// Default model used when a request is built by the client.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Default GitHub Models inference endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://models.github.ai/inference";
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "microsoft/Phi-4-multimodal-instruct";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Creates a configuration for the given endpoint and model.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            timeout_secs: Some(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `GHMODELS_ENDPOINT` - Optional endpoint
    /// - `GHMODELS_MODEL` - Optional default model
    #[must_use]
    pub fn from_env() -> Self {
        let endpoint = std::env::var("GHMODELS_ENDPOINT")
            .unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_owned());
        let model =
            std::env::var("GHMODELS_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_owned());
        Self::new(endpoint, model)
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Disables the request timeout.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout_secs = None;
        self
    }

    /// Build the chat completions URL.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT, Self::DEFAULT_MODEL)
    }
}

/// Opaque bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Environment variable read by [`from_env`](Self::from_env).
    pub const ENV_VAR: &'static str = "GITHUB_TOKEN";

    /// Wrap a token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCredential`] if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::EmptyCredential);
        }
        Ok(Self(token))
    }

    /// Read the token from `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(Self::ENV_VAR)
    }

    /// Read the token from the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if the variable is unset or blank.
    pub fn from_env_var(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(Self(token)),
            _ => Err(Error::missing_credential(var)),
        }
    }

    /// The raw token, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_github_models() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, ClientConfig::DEFAULT_ENDPOINT);
        assert_eq!(config.model, "microsoft/Phi-4-multimodal-instruct");
        assert_eq!(config.timeout_secs, Some(120));
        assert_eq!(
            config.chat_url(),
            "https://models.github.ai/inference/chat/completions"
        );
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::default()
            .with_endpoint("http://localhost:8080/")
            .with_model("openai/gpt-4o-mini")
            .with_timeout(30);
        assert_eq!(config.chat_url(), "http://localhost:8080/chat/completions");
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.without_timeout().timeout_secs, None);
    }

    #[test]
    fn blank_credential_is_rejected_without_naming_a_variable() {
        let err = Credential::new("   ").unwrap_err();
        assert!(matches!(err, Error::EmptyCredential));
        assert!(!err.to_string().contains(Credential::ENV_VAR));
        assert_eq!(Credential::new("ghp_x").unwrap().expose(), "ghp_x");
    }

    #[test]
    fn unset_variable_is_missing() {
        let err = Credential::from_env_var("GHMODELS_TEST_TOKEN_THAT_IS_NEVER_SET").unwrap_err();
        assert!(
            matches!(err, Error::MissingCredential { ref var } if var == "GHMODELS_TEST_TOKEN_THAT_IS_NEVER_SET")
        );
    }

    #[test]
    fn debug_redacts_token() {
        let credential = Credential::new("ghp_secret").unwrap();
        assert_eq!(format!("{credential:?}"), "Credential(***)");
    }
}
