//! LLM backend error taxonomy

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to an LLM backend.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    #[error("API error{}: {message}", .status_code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Rate limit exceeded, retry after the specified duration (in seconds)
    #[error("rate limit exceeded{}", .retry_after.map(|s| format!(", retry after {s} seconds")).unwrap_or_default())]
    RateLimit { retry_after: Option<u64> },

    /// Network-related error
    #[error("network error: {message}")]
    Network { message: String },

    /// Invalid or malformed response from the LLM
    #[error("invalid response from LLM: {message}")]
    InvalidResponse { message: String },

    /// Configuration error (missing API keys, invalid settings, etc.)
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Generic error for other cases
    #[error("{message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BackendError::Api {
            message: "bad gateway".to_string(),
            status_code: Some(502),
        };
        assert_eq!(err.to_string(), "API error (502): bad gateway");

        let err = BackendError::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "request timed out after 30 seconds");

        let err = BackendError::RateLimit { retry_after: Some(5) };
        assert_eq!(err.to_string(), "rate limit exceeded, retry after 5 seconds");
    }
}
