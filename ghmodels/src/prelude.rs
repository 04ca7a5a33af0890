//! Convenience re-exports.
//!
//! ```rust,ignore
//! use ghmodels::prelude::*;
//! ```

pub use crate::chat::{ChatRequest, ChatRequestBuilder};
pub use crate::client::ModelsClient;
pub use crate::compose::MessageComposer;
pub use crate::config::{ClientConfig, Credential};
pub use crate::error::{ApiError, BoxError, Error, Result};
pub use crate::message::{Content, ContentPart, ImageDetail, ImageUrl, Message, Role};
pub use crate::multimodal::{DataUrl, ImageAsset, ImageFormat};
pub use crate::response::{ChatCompletion, ChatOutcome, RawResponse, extract_text};
pub use crate::transport::{ReqwestTransport, Transport};
