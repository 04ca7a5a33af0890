//! Response classification.
//!
//! The transport hands back a [`RawResponse`] (status + body bytes).
//! [`ChatOutcome::classify`] decides once whether it is a well-formed
//! completion or a failure, and downstream code only matches on the result.
//!
//! A response counts as a success when the status is 2xx **and** the body
//! has a `choices` array. Everything else becomes an [`ApiError`], built from
//! whatever `error.message` / `error.code` fields the body carries.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, Error, Result};

/// Undecoded response from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Create a raw response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a raw response from a JSON value.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Successful chat completion body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatCompletion {
    /// Generated choices, in service order.
    pub choices: Vec<Choice>,
    /// Model that served the request, when reported.
    #[serde(default)]
    pub model: Option<String>,
}

/// One generated choice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,
    /// Why generation stopped, when reported.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text. `null` is read as absent.
    #[serde(default)]
    pub content: Option<String>,
}

/// Classified response: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Well-formed completion.
    Success(ChatCompletion),
    /// Error response, or a body that did not match the success shape.
    Failure(ApiError),
}

impl ChatOutcome {
    /// Classify a raw transport response. Never fails.
    #[must_use]
    pub fn classify(raw: &RawResponse) -> Self {
        if raw.is_success() {
            match serde_json::from_slice::<ChatCompletion>(&raw.body) {
                Ok(completion) => {
                    debug!(
                        status = raw.status,
                        choices = completion.choices.len(),
                        "classified response as success"
                    );
                    return Self::Success(completion);
                }
                Err(e) => {
                    debug!(status = raw.status, error = %e, "2xx body does not match completion shape");
                }
            }
        }

        let error = parse_api_error(raw);
        warn!(status = error.status, code = ?error.code, message = %error.message, "API returned an error");
        Self::Failure(error)
    }

    /// Whether this outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Extract the text of the first choice.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for a failure outcome
    /// - [`Error::EmptyChoices`] for a success with no choices
    pub fn into_text(self) -> Result<String> {
        match self {
            Self::Success(completion) => completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content.unwrap_or_default())
                .ok_or(Error::EmptyChoices),
            Self::Failure(error) => Err(Error::Api(error)),
        }
    }
}

/// Classify and extract in one step.
///
/// # Errors
///
/// See [`ChatOutcome::into_text`].
pub fn extract_text(raw: &RawResponse) -> Result<String> {
    ChatOutcome::classify(raw).into_text()
}

fn parse_api_error(raw: &RawResponse) -> ApiError {
    let fallback = || {
        let text = raw.text();
        let text = text.trim();
        if text.is_empty() {
            format!("unexpected response with HTTP status {}", raw.status)
        } else {
            text.to_owned()
        }
    };

    let Ok(body) = serde_json::from_slice::<Value>(&raw.body) else {
        return ApiError::new(raw.status, fallback());
    };

    // `{ "error": { "message", "code" } }`, `{ "error": "..." }`, or a flat
    // `{ "message", "code" }` object.
    let source = match body.get("error") {
        Some(Value::String(message)) => return ApiError::new(raw.status, message.clone()),
        Some(obj @ Value::Object(_)) => obj,
        _ => &body,
    };

    let message = source
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(fallback, str::to_owned);
    let code = source.get("code").and_then(|code| match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    ApiError {
        status: raw.status,
        message,
        code,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "Phi-4-multimodal-instruct",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn success_extracts_first_choice() {
        let raw = RawResponse::json(200, &json!({"choices": [{"message": {"content": "Paris"}}]}));
        assert_eq!(extract_text(&raw).unwrap(), "Paris");

        let raw = RawResponse::json(200, &completion("8"));
        let outcome = ChatOutcome::classify(&raw);
        assert!(outcome.is_success());
        assert_eq!(outcome.into_text().unwrap(), "8");
    }

    #[test]
    fn bad_request_becomes_api_error() {
        let raw = RawResponse::json(400, &json!({"error": {"message": "bad request"}}));
        let err = extract_text(&raw).unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.message, "bad request");
        assert_eq!(api.code, None);
        assert_eq!(api.status, 400);
    }

    #[test]
    fn error_code_is_kept() {
        let raw = RawResponse::json(
            401,
            &json!({"error": {"code": "unauthorized", "message": "Bad credentials"}}),
        );
        let outcome = ChatOutcome::classify(&raw);
        assert_eq!(
            outcome,
            ChatOutcome::Failure(ApiError::new(401, "Bad credentials").with_code("unauthorized"))
        );

        let raw = RawResponse::json(429, &json!({"error": {"code": 429, "message": "slow down"}}));
        assert_eq!(
            extract_text(&raw).unwrap_err().as_api().unwrap().code.as_deref(),
            Some("429")
        );
    }

    #[test]
    fn empty_choices_is_distinct() {
        let raw = RawResponse::json(200, &json!({"choices": []}));
        assert!(matches!(extract_text(&raw), Err(Error::EmptyChoices)));
    }

    #[test]
    fn malformed_error_bodies_degrade() {
        let raw = RawResponse::new(502, "Bad Gateway");
        let api = extract_text(&raw).unwrap_err().as_api().cloned().unwrap();
        assert_eq!(api.message, "Bad Gateway");

        let raw = RawResponse::new(500, "");
        let api = extract_text(&raw).unwrap_err().as_api().cloned().unwrap();
        assert_eq!(api.message, "unexpected response with HTTP status 500");

        let raw = RawResponse::json(403, &json!({"error": "forbidden"}));
        assert_eq!(extract_text(&raw).unwrap_err().as_api().unwrap().message, "forbidden");

        let raw = RawResponse::json(404, &json!({"message": "Not Found", "code": "not_found"}));
        let api = extract_text(&raw).unwrap_err().as_api().cloned().unwrap();
        assert_eq!(api.message, "Not Found");
        assert_eq!(api.code.as_deref(), Some("not_found"));

        let raw = RawResponse::json(400, &json!({"error": {"code": 7}}));
        let api = extract_text(&raw).unwrap_err().as_api().cloned().unwrap();
        assert_eq!(api.code.as_deref(), Some("7"));
        assert!(api.message.contains("\"code\""));
    }

    #[test]
    fn success_status_with_wrong_shape_is_failure() {
        let raw = RawResponse::json(200, &json!({"error": {"message": "quota exceeded"}}));
        let outcome = ChatOutcome::classify(&raw);
        assert!(!outcome.is_success());
        assert_eq!(outcome.into_text().unwrap_err().as_api().unwrap().message, "quota exceeded");

        let raw = RawResponse::json(200, &json!({"choices": "nope"}));
        assert!(matches!(extract_text(&raw), Err(Error::Api(_))));
    }

    #[test]
    fn error_status_with_choices_is_still_failure() {
        let raw = RawResponse::json(500, &completion("ignored"));
        assert!(matches!(extract_text(&raw), Err(Error::Api(_))));
    }

    #[test]
    fn null_content_reads_as_empty() {
        let raw = RawResponse::json(200, &json!({"choices": [{"message": {"content": null}}]}));
        assert_eq!(extract_text(&raw).unwrap(), "");
    }
}
