//! Inline image encoding.
//!
//! Local image files are embedded into requests as base64 data URLs of the
//! form `data:image/{format};base64,{payload}`.
//!
//! The format token is whatever the caller declares. It is not checked
//! against the file bytes; [`ImageFormat::from_magic_bytes`] is available for
//! callers that want to sniff it explicitly.
//!
//! # Example
//!
//! ```rust,ignore
//! use ghmodels::multimodal::ImageAsset;
//!
//! let url = ImageAsset::new("example.jpg", "jpeg").encode().await?;
//! assert!(url.as_str().starts_with("data:image/jpeg;base64,"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// Well-known image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// GIF format.
    Gif,
    /// WebP format.
    Webp,
}

impl ImageFormat {
    /// The token used in data URLs (`image/{token}`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detect format from magic bytes (file signature).
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, 0x50, 0x4E, 0x47, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x47, 0x49, 0x46, 0x38, ..] => Some(Self::Gif),
            [0x52, 0x49, 0x46, 0x46, _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local image file together with its declared format.
///
/// Without a declared format the file signature decides at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    path: PathBuf,
    format: Option<String>,
}

impl ImageAsset {
    /// Create an asset with an explicit format token (e.g. `"jpeg"`).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: Some(format.into()),
        }
    }

    /// Create an asset whose format is taken from the file extension.
    ///
    /// Falls back to the lowercased extension itself when it is not a
    /// well-known image format. Without an extension the format is sniffed
    /// from the file bytes by [`encode`](Self::encode).
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = path.extension().and_then(|e| e.to_str()).map(|ext| {
            ImageFormat::from_extension(ext)
                .map_or_else(|| ext.to_lowercase(), |f| f.as_str().to_owned())
        });
        Self { path, format }
    }

    /// Path of the image file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared format token, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Read the file and encode it as a data URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file does not exist or cannot be
    /// read, and [`Error::InvalidDataUrl`] if no format was declared and the
    /// file signature is not a known image format.
    pub async fn encode(&self) -> Result<DataUrl> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::file_read(&self.path, e))?;
        self.finish(&bytes)
    }

    /// Blocking variant of [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode).
    pub fn encode_blocking(&self) -> Result<DataUrl> {
        let bytes = std::fs::read(&self.path).map_err(|e| Error::file_read(&self.path, e))?;
        self.finish(&bytes)
    }

    fn finish(&self, bytes: &[u8]) -> Result<DataUrl> {
        let format = match &self.format {
            Some(format) => format.as_str(),
            None => ImageFormat::from_magic_bytes(bytes)
                .map(|f| f.as_str())
                .ok_or_else(|| {
                    Error::invalid_data_url(format!(
                        "cannot detect image format of '{}'",
                        self.path.display()
                    ))
                })?,
        };
        debug!(path = %self.path.display(), format, bytes = bytes.len(), "encoded image");
        Ok(DataUrl::from_bytes(bytes, format))
    }
}

/// An image embedded inline as `data:image/{format};base64,{payload}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encode raw bytes under the given format token.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        Self(format!(
            "{DATA_URL_PREFIX}{format}{BASE64_MARKER}{}",
            BASE64.encode(bytes)
        ))
    }

    /// Parse an existing data URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataUrl`] if the string is not an image data
    /// URL with a non-empty format and a base64 payload.
    pub fn parse(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let rest = url
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| Error::invalid_data_url("missing `data:image/` prefix"))?;
        match rest.split_once(BASE64_MARKER) {
            None => Err(Error::invalid_data_url("missing `;base64,` marker")),
            Some(("", _)) => Err(Error::invalid_data_url("empty image format")),
            Some(_) => Ok(Self(url)),
        }
    }

    /// The full URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the URL string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The format token between `image/` and `;base64,`.
    #[must_use]
    pub fn format(&self) -> &str {
        self.split().0
    }

    /// The base64 payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.split().1
    }

    /// Decode the payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataUrl`] if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.payload())
            .map_err(|e| Error::invalid_data_url(e.to_string()))
    }

    fn split(&self) -> (&str, &str) {
        let rest = self.0.strip_prefix(DATA_URL_PREFIX).unwrap_or(&self.0);
        rest.split_once(BASE64_MARKER).unwrap_or((rest, ""))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Image: {}, {} base64 chars]", self.format(), self.payload().len())
    }
}

impl AsRef<str> for DataUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DataUrl> for String {
    fn from(url: DataUrl) -> Self {
        url.0
    }
}
