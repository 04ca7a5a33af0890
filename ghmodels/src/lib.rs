//! ghmodels - text and vision chat completions for GitHub Models
//!
//! This crate covers one request/response cycle against a hosted
//! chat-completion endpoint: encode local images as data URLs, compose the
//! ordered messages, build the request, send it through a [`Transport`], and
//! classify the reply into generated text or a typed [`Error`].
//!
//! [`Transport`]: transport::Transport

pub mod chat;
pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod message;
pub mod multimodal;
pub mod prelude;
pub mod response;
pub mod transport;

pub use error::{ApiError, BoxError, Error, Result};
