//! Message composition.
//!
//! [`MessageComposer`] assembles the ordered message list for one request:
//! an optional leading system message, one user message (plain text or
//! multimodal parts in the order they were added), and an optional trailing
//! plain-text follow-up.
//!
//! ```rust,ignore
//! let messages = MessageComposer::new()
//!     .text("What's in this image?")
//!     .image(ImageAsset::new("example.jpg", "jpeg").encode().await?, ImageDetail::Low)
//!     .follow_up("Also, tell me a fun fact about Paris.")
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::message::{ContentPart, ImageDetail, Message, Role};
use crate::multimodal::{DataUrl, ImageAsset};

/// Builder for the messages of a single request.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    system: Option<String>,
    parts: Vec<ContentPart>,
    follow_up: Option<String>,
}

impl MessageComposer {
    /// Create an empty composer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose a single plain-text user message.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Vec<Message> {
        vec![Message::user(text)]
    }

    /// Set a leading system message.
    #[must_use]
    pub fn system(mut self, text: impl Into<String>) -> Self {
        self.system = Some(text.into());
        self
    }

    /// Append a text part.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(ContentPart::text(text));
        self
    }

    /// Append an image part.
    #[must_use]
    pub fn image(mut self, url: DataUrl, detail: ImageDetail) -> Self {
        self.parts.push(ContentPart::image(url, detail));
        self
    }

    /// Append an arbitrary content part.
    #[must_use]
    pub fn part(mut self, part: ContentPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Encode an image file and append it as an image part.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::FileRead`] from the encoder unchanged.
    pub async fn image_file(self, asset: &ImageAsset, detail: ImageDetail) -> Result<Self> {
        let url = asset.encode().await?;
        Ok(self.image(url, detail))
    }

    /// Set a plain-text user message sent after the main one.
    #[must_use]
    pub fn follow_up(mut self, text: impl Into<String>) -> Self {
        self.follow_up = Some(text.into());
        self
    }

    /// Build the ordered message list.
    ///
    /// The parts are always kept as an ordered multimodal message, even a
    /// lone text part. Use [`single`](Self::single) for plain string content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if no parts were added.
    pub fn build(self) -> Result<Vec<Message>> {
        let mut messages = Vec::with_capacity(3);
        if let Some(system) = self.system {
            messages.push(Message::system(system));
        }

        if self.parts.is_empty() {
            return Err(Error::invalid_request("no content was added to the message"));
        }
        messages.push(Message::with_parts(Role::User, self.parts)?);

        if let Some(follow_up) = self.follow_up {
            messages.push(Message::user(follow_up));
        }
        Ok(messages)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::message::Content;

    #[test]
    fn single_text_is_plain_string() {
        let messages = MessageComposer::single("What is the capital of France?");
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].content,
            Content::Text("What is the capital of France?".into())
        );

    }

    #[test]
    fn lone_text_part_stays_a_part() {
        let built = MessageComposer::new().text("hi").build().unwrap();
        assert_eq!(built[0].content, Content::Parts(vec![ContentPart::text("hi")]));

        let built = MessageComposer::new()
            .part(ContentPart::text("x"))
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            serde_json::json!([{"role": "user", "content": [{"type": "text", "text": "x"}]}])
        );
    }

    #[test]
    fn text_then_image_keeps_order() {
        let url = DataUrl::from_bytes(b"\xff\xd8\xff", "jpeg");
        let messages = MessageComposer::new()
            .text("What's in this image?")
            .image(url.clone(), ImageDetail::Low)
            .build()
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].content,
            Content::Parts(vec![
                ContentPart::text("What's in this image?"),
                ContentPart::image(url, ImageDetail::Low),
            ])
        );
    }

    #[test]
    fn interleaved_parts_are_not_reordered() {
        let a = DataUrl::from_bytes(b"a", "png");
        let b = DataUrl::from_bytes(b"b", "png");
        let messages = MessageComposer::new()
            .image(a.clone(), ImageDetail::High)
            .text("compare with")
            .image(b.clone(), ImageDetail::High)
            .text("which is brighter?")
            .build()
            .unwrap();

        let Content::Parts(parts) = &messages[0].content else {
            panic!("expected parts");
        };
        assert_eq!(
            parts,
            &vec![
                ContentPart::image(a, ImageDetail::High),
                ContentPart::text("compare with"),
                ContentPart::image(b, ImageDetail::High),
                ContentPart::text("which is brighter?"),
            ]
        );
    }

    #[test]
    fn follow_up_and_system_wrap_the_main_message() {
        let url = DataUrl::from_bytes(b"x", "jpeg");
        let messages = MessageComposer::new()
            .system("You are a helpful assistant.")
            .text("What's in this image?")
            .image(url, ImageDetail::Low)
            .follow_up("Also, tell me a fun fact about Paris.")
            .build()
            .unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], Message::system("You are a helpful assistant."));
        assert!(messages[1].has_images());
        assert_eq!(
            messages[2],
            Message::user("Also, tell me a fun fact about Paris.")
        );
    }

    #[test]
    fn empty_composer_fails() {
        let err = MessageComposer::new().follow_up("only this").build().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn image_file_propagates_read_errors() {
        let asset = ImageAsset::new("missing/example.jpg", "jpeg");
        let err = MessageComposer::new()
            .text("What's in this image?")
            .image_file(&asset, ImageDetail::Low)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
