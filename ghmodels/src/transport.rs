//! HTTP transport seam.
//!
//! [`Transport`] is the only place network I/O happens. It posts a
//! [`ChatRequest`] with a bearer credential and returns the status and body
//! untouched; classification is done by [`crate::response`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::chat::ChatRequest;
use crate::config::Credential;
use crate::error::Result;
use crate::response::RawResponse;

/// Sends chat requests over the wire.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `request` as JSON to `url` with `Authorization: Bearer <credential>`.
    ///
    /// Non-2xx statuses are returned as a [`RawResponse`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) on connection,
    /// timeout or body read failures. Implementations wrap their own error
    /// type with [`Error::transport`](crate::Error::transport).
    async fn send(
        &self,
        url: &str,
        credential: &Credential,
        request: &ChatRequest,
    ) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(
        &self,
        url: &str,
        credential: &Credential,
        request: &ChatRequest,
    ) -> Result<RawResponse> {
        (**self).send(url, credential, request).await
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) if the HTTP
    /// client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        credential: &Credential,
        request: &ChatRequest,
    ) -> Result<RawResponse> {
        debug!(url, model = request.model(), "POST chat completion");

        let response = self
            .client
            .post(url)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}
