//! Chat message types.
//!
//! A [`Message`] carries a [`Role`] and either plain text or an ordered,
//! non-empty list of [`ContentPart`]s. The serialized form matches the chat
//! completions wire format:
//!
//! ```json
//! { "role": "user", "content": "4+4=" }
//! { "role": "user", "content": [
//!     { "type": "text", "text": "What's in this image?" },
//!     { "type": "image_url", "image_url": { "url": "data:...", "detail": "low" } }
//! ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::multimodal::DataUrl;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message providing instructions.
    System,
    /// User message.
    User,
    /// Assistant (model) message.
    Assistant,
}

impl Role {
    /// Get the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Detail level requested for image processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    /// Low resolution, cheaper.
    Low,
    /// High resolution.
    High,
    /// Let the service decide.
    #[default]
    Auto,
}

impl ImageDetail {
    /// Get the string representation of the detail level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
            Self::Auto => "auto",
        }
    }
}

impl std::str::FromStr for ImageDetail {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            "auto" => Ok(Self::Auto),
            other => Err(Error::invalid_request(format!(
                "unknown image detail `{other}` (expected low, high or auto)"
            ))),
        }
    }
}

/// Image reference inside a content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Data URL or remote URL of the image.
    pub url: String,
    /// Requested detail level.
    pub detail: ImageDetail,
}

/// One piece of a multimodal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text part.
    Text {
        /// The text.
        text: String,
    },
    /// Image part.
    ImageUrl {
        /// The image reference.
        image_url: ImageUrl,
    },
}

impl ContentPart {
    /// Create a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image part from an encoded data URL.
    #[must_use]
    pub fn image(url: DataUrl, detail: ImageDetail) -> Self {
        Self::image_url(url.into_string(), detail)
    }

    /// Create an image part from any URL string.
    #[must_use]
    pub fn image_url(url: impl Into<String>, detail: ImageDetail) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail,
            },
        }
    }

    /// Get the text if this is a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ImageUrl { .. } => None,
        }
    }

    /// Check if this is an image part.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::ImageUrl { .. })
    }
}

/// Message content: plain text or ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain string content.
    Text(String),
    /// Ordered content parts. Never empty.
    Parts(Vec<ContentPart>),
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender.
    pub role: Role,
    /// Content of the message.
    pub content: Content,
}

impl Message {
    /// Create a plain text message.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Content::Text(text.into()),
        }
    }

    /// Create a system message.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Create a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Create a message from ordered content parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `parts` is empty.
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Result<Self> {
        if parts.is_empty() {
            return Err(Error::invalid_request("message content parts must not be empty"));
        }
        Ok(Self {
            role,
            content: Content::Parts(parts),
        })
    }

    /// The message text: the plain string, or all text parts joined by newlines.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.content {
            Content::Text(text) => text.clone(),
            Content::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Check if the message contains at least one image.
    #[must_use]
    pub fn has_images(&self) -> bool {
        matches!(&self.content, Content::Parts(parts) if parts.iter().any(ContentPart::is_image))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_serializes_as_string() {
        let msg = Message::user("4+4=");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "user", "content": "4+4="})
        );
    }

    #[test]
    fn parts_serialize_in_order() {
        let url = DataUrl::from_bytes(b"img", "jpeg");
        let msg = Message::with_parts(
            Role::User,
            vec![
                ContentPart::text("What's in this image?"),
                ContentPart::image(url, ImageDetail::Low),
            ],
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "What's in this image?"},
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,aW1n", "detail": "low"}}
                ]
            })
        );
        assert!(msg.has_images());
    }

    #[test]
    fn empty_parts_are_rejected() {
        let err = Message::with_parts(Role::User, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn deserializes_both_content_shapes() {
        let msg: Message =
            serde_json::from_value(json!({"role": "assistant", "content": "hi"})).unwrap();
        assert_eq!(msg, Message::assistant("hi"));

        let msg: Message = serde_json::from_value(json!({
            "role": "user",
            "content": [{"type": "text", "text": "a"}, {"type": "text", "text": "b"}]
        }))
        .unwrap();
        assert_eq!(msg.text(), "a\nb");
        assert!(!msg.has_images());
    }

    #[test]
    fn image_detail_parsing() {
        assert_eq!("LOW".parse::<ImageDetail>().unwrap(), ImageDetail::Low);
        assert_eq!(ImageDetail::default().as_str(), "auto");
        assert!("medium".parse::<ImageDetail>().is_err());
    }

    #[test]
    fn role_strings() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
