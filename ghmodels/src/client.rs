//! GitHub Models chat client.
//!
//! [`ModelsClient`] ties the pieces together for a single round trip:
//! compose → build request → [`Transport`] → classify → text.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::chat::{ChatRequest, ChatRequestBuilder};
use crate::compose::MessageComposer;
use crate::config::{ClientConfig, Credential};
use crate::error::Result;
use crate::message::ImageDetail;
use crate::multimodal::ImageAsset;
use crate::response::ChatOutcome;
use crate::transport::{ReqwestTransport, Transport};

/// Chat completion client.
///
/// The credential and configuration are shared read-only; every call builds
/// its own request and response values.
#[derive(Debug, Clone)]
pub struct ModelsClient<T = ReqwestTransport> {
    config: Arc<ClientConfig>,
    credential: Arc<Credential>,
    transport: T,
}

impl ModelsClient<ReqwestTransport> {
    /// Create a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) if the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig, credential: Credential) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs.map(Duration::from_secs))?;
        Ok(Self::with_transport(config, credential, transport))
    }

    /// Create a client from `GITHUB_TOKEN` and the optional
    /// `GHMODELS_ENDPOINT` / `GHMODELS_MODEL` variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`](crate::Error::MissingCredential)
    /// if no token is set.
    pub fn from_env() -> Result<Self> {
        let credential = Credential::from_env()?;
        Self::new(ClientConfig::from_env(), credential)
    }
}

impl<T: Transport> ModelsClient<T> {
    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, credential: Credential, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            credential: Arc::new(credential),
            transport,
        }
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Start a request for the default model.
    pub fn request(&self) -> ChatRequestBuilder {
        ChatRequest::builder(self.config.model.clone())
    }

    /// Send a request and return the classified outcome.
    ///
    /// # Errors
    ///
    /// Only transport failures are errors here; API errors come back as
    /// [`ChatOutcome::Failure`].
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatOutcome> {
        let raw = self
            .transport
            .send(&self.config.chat_url(), &self.credential, request)
            .await?;
        Ok(ChatOutcome::classify(&raw))
    }

    /// Send a request and return the generated text.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`](crate::Error::Transport) on network failure
    /// - [`Error::Api`](crate::Error::Api) when the service reports an error
    /// - [`Error::EmptyChoices`](crate::Error::EmptyChoices) when no choice came back
    #[instrument(
        skip(self, request),
        fields(model = request.model(), messages = request.messages().len())
    )]
    pub async fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!("sending chat completion");
        let text = self.send(request).await?.into_text()?;
        debug!(chars = text.len(), "chat completion finished");
        Ok(text)
    }

    /// Ask a plain text question.
    ///
    /// # Errors
    ///
    /// See [`complete`](Self::complete).
    pub async fn ask(&self, prompt: &str, temperature: Option<f64>) -> Result<String> {
        let mut builder = self.request().messages(MessageComposer::single(prompt));
        if let Some(t) = temperature {
            builder = builder.temperature(t);
        }
        self.complete(&builder.build()?).await
    }

    /// Ask about a local image, optionally followed by a plain-text question.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`](crate::Error::FileRead) if the image cannot
    /// be read, otherwise see [`complete`](Self::complete).
    pub async fn ask_about_image(
        &self,
        prompt: &str,
        image: &ImageAsset,
        detail: ImageDetail,
        follow_up: Option<&str>,
    ) -> Result<String> {
        let mut composer = MessageComposer::new()
            .text(prompt)
            .image_file(image, detail)
            .await?;
        if let Some(follow_up) = follow_up {
            composer = composer.follow_up(follow_up);
        }
        let request = self.request().messages(composer.build()?).build()?;
        self.complete(&request).await
    }
}
