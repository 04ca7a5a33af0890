//! Chat completion requests.
//!
//! [`ChatRequest`] is the payload posted to `/chat/completions`. It is built
//! through [`ChatRequestBuilder`], which enforces a non-empty model and a
//! non-empty message list. Sampling parameters are passed through as given;
//! range checks are left to the service.
//!
//! # Example
//!
//! ```rust,ignore
//! use ghmodels::prelude::*;
//!
//! let request = ChatRequest::builder("microsoft/Phi-4-multimodal-instruct")
//!     .user("4+4=")
//!     .temperature(0.7)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::message::Message;

/// A chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

impl ChatRequest {
    /// Start building a request for the given model.
    #[must_use]
    pub fn builder(model: impl Into<String>) -> ChatRequestBuilder {
        ChatRequestBuilder::new(model)
    }

    /// Build a request in one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `model` or `messages` is empty.
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
        temperature: Option<f64>,
    ) -> Result<Self> {
        let mut builder = Self::builder(model).messages(messages);
        builder.temperature = temperature;
        builder.build()
    }

    /// Model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ordered messages.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Sampling temperature, if set.
    #[must_use]
    pub const fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Serialize to the JSON wire body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Builder for [`ChatRequest`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ChatRequestBuilder {
    model: String,
    messages: Vec<Message>,
    temperature: Option<f64>,
}

impl ChatRequestBuilder {
    /// Creates a builder for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Adds a message.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Appends messages in order.
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Adds a system message.
    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Message::system(content))
    }

    /// Adds a user message.
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    /// Sets temperature (commonly 0.0 to 2.0, not checked here).
    pub const fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Finish the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the model is blank or no message
    /// was added.
    pub fn build(self) -> Result<ChatRequest> {
        if self.model.trim().is_empty() {
            return Err(Error::invalid_request("model must not be empty"));
        }
        if self.messages.is_empty() {
            return Err(Error::invalid_request("at least one message is required"));
        }
        Ok(ChatRequest {
            model: self.model,
            messages: self.messages,
            temperature: self.temperature,
        })
    }
}
