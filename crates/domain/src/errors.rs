//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a [`ForgeError`]
///
/// The SDK never acts on the category itself; it exists so callers can decide
/// what a failure means for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, DNS, TLS or timeout failure before a response arrived
    Transport,
    /// 401 and 403 responses, including a rejected token exchange
    Authentication,
    /// Remaining 4xx responses
    Client,
    /// 5xx responses
    Server,
    /// Response arrived but did not have the expected shape
    Malformed,
    /// Bad configuration or caller input, detected before any I/O
    Config,
}

/// Main error type for the SDK
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ForgeError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus { status: u16, url: String, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ForgeError {
    /// Get the error category for this error
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Transport,
            Self::HttpStatus { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::MalformedResponse(_) => ErrorCategory::Malformed,
            Self::Serialization(_) | Self::Config(_) | Self::InvalidInput(_) => {
                ErrorCategory::Config
            }
        }
    }

    /// HTTP status code, when the error came from a non-success response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body, when the error came from a non-success response
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> ForgeError {
        ForgeError::HttpStatus {
            status,
            url: "https://example.test/buckets".to_string(),
            body: "nope".to_string(),
        }
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(status_error(401).category(), ErrorCategory::Authentication);
        assert_eq!(status_error(403).category(), ErrorCategory::Authentication);
        assert_eq!(status_error(404).category(), ErrorCategory::Client);
        assert_eq!(status_error(429).category(), ErrorCategory::Client);
        assert_eq!(status_error(503).category(), ErrorCategory::Server);
    }

    #[test]
    fn test_non_status_categories() {
        assert_eq!(ForgeError::Transport("reset".into()).category(), ErrorCategory::Transport);
        assert_eq!(
            ForgeError::MalformedResponse("no items".into()).category(),
            ErrorCategory::Malformed
        );
        assert_eq!(ForgeError::InvalidInput("url".into()).category(), ErrorCategory::Config);
    }

    #[test]
    fn test_status_and_body_accessors() {
        let err = status_error(409);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.body(), Some("nope"));
        assert_eq!(ForgeError::Config("x".into()).status(), None);
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let message = status_error(400).to_string();
        assert!(message.contains("400"));
        assert!(message.contains("nope"));
    }
}
