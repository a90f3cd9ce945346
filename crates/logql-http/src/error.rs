//! HTTP client error types

use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Header name or value rejected
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Status code for `HttpStatus` errors
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HttpError::HttpStatus { status, .. } => Some(*status),
            HttpError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the request timed out in the transport
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::RequestFailed(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = HttpError::HttpStatus {
            status: reqwest::StatusCode::BAD_GATEWAY,
            message: "upstream".to_string(),
        };
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_GATEWAY));
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: upstream");
        assert!(HttpError::InvalidUrl("x".to_string()).status().is_none());
    }
}
