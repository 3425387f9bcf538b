// ABOUTME: Error types for the card transcoder with user-friendly messages
// ABOUTME: Groups every failure into retrieval, decode, or encode kinds

use thiserror::Error;

/// Coarse failure category for a transcode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source bytes could not be fetched
    Retrieval,
    /// The fetched bytes are not a supported image
    Decode,
    /// Resizing or re-encoding failed
    Encode,
}

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request for {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Timeout: {url} took too long to respond")]
    Timeout { url: String },

    #[error("Response from {url} exceeded the {limit} byte limit")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid target size {0}: expected 1..={max}", max = crate::constants::limits::MAX_WEBP_DIMENSION)]
    InvalidSize(i64),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TranscodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscodeError::InvalidUrl { .. }
            | TranscodeError::Network { .. }
            | TranscodeError::HttpStatus { .. }
            | TranscodeError::Timeout { .. }
            | TranscodeError::BodyTooLarge { .. }
            | TranscodeError::Configuration(_) => ErrorKind::Retrieval,
            TranscodeError::Decode(_) => ErrorKind::Decode,
            TranscodeError::InvalidSize(_) | TranscodeError::Encode(_) => ErrorKind::Encode,
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            TranscodeError::InvalidUrl { .. } => {
                Some("Use an absolute http(s) URL, e.g. https://example.com/avatar.gif")
            }
            TranscodeError::Network { .. } => Some("Check your internet connection and try again"),
            TranscodeError::Timeout { .. } => Some("Try again or raise the timeout"),
            TranscodeError::BodyTooLarge { .. } => Some("Raise the size limit or use a smaller image"),
            TranscodeError::InvalidSize(_) => Some("Pick a size between 1 and 16383 pixels"),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranscodeError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            TranscodeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            TranscodeError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl From<image::ImageError> for TranscodeError {
    fn from(err: image::ImageError) -> Self {
        TranscodeError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
