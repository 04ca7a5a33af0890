//! Error types for ghmodels.
//!
//! Every failure surfaces to the immediate caller as an [`Error`]:
//! - credential and request-construction problems before anything is sent
//! - file read failures while encoding images
//! - transport failures and remote API errors after the round trip
//!
//! Nothing here retries or terminates the process.

use std::fmt;
use std::path::PathBuf;

/// Boxed error carried by [`Error::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for ghmodels operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for ghmodels.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No credential token was available.
    #[error("missing credential: set the {var} environment variable")]
    MissingCredential {
        /// Name of the environment variable that was consulted.
        var: String,
    },

    /// A credential token was supplied directly but is blank.
    #[error("credential token is empty")]
    EmptyCredential,

    /// An image file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    FileRead {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The remote service answered with an error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The service answered successfully but returned no choices.
    #[error("response contained no choices")]
    EmptyChoices,

    /// Failure reported by the transport, passed through unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A request value violated one of its construction rules.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A data URL could not be parsed.
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing credential error for the given variable name.
    #[must_use]
    pub fn missing_credential(var: impl Into<String>) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    /// Create a file read error.
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Wrap any transport failure.
    #[must_use]
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport(source.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an invalid data URL error.
    #[must_use]
    pub fn invalid_data_url(msg: impl Into<String>) -> Self {
        Self::InvalidDataUrl(msg.into())
    }

    /// Returns the remote API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Structured error reported by the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Human-readable message from the service.
    pub message: String,
    /// Optional machine-readable error code.
    pub code: Option<String>,
}

impl ApiError {
    /// Create an API error without a code.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    /// Attach an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {} (HTTP {})", code, self.message, self.status),
            None => write!(f, "{} (HTTP {})", self.message, self.status),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code() {
        let err = ApiError::new(401, "Bad credentials").with_code("unauthorized");
        assert_eq!(err.to_string(), "[unauthorized] Bad credentials (HTTP 401)");

        let err = ApiError::new(400, "bad request");
        assert_eq!(err.to_string(), "bad request (HTTP 400)");
    }

    #[test]
    fn file_read_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = Error::file_read("example.jpg", io);
        assert!(err.to_string().contains("example.jpg"));
    }

    #[test]
    fn transport_keeps_the_original_error() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
        let err = Error::transport(io);
        assert_eq!(err.to_string(), "transport error: deadline elapsed");
        let source = err.source().and_then(|e| e.downcast_ref::<std::io::Error>());
        assert_eq!(source.map(std::io::Error::kind), Some(std::io::ErrorKind::TimedOut));

        let err = Error::transport("connection reset");
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn as_api_only_matches_api_variant() {
        let err: Error = ApiError::new(500, "boom").into();
        assert_eq!(err.as_api().map(|e| e.status), Some(500));
        assert!(Error::EmptyChoices.as_api().is_none());
    }
}
