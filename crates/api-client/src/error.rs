//! Error types for the API client

use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Marker message carried by [`ApiError::NotConfigured`]
pub const NOT_CONFIGURED: &str = "API_NOT_CONFIGURED";

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend URL or anon key is missing; no request was attempted
    #[error("API_NOT_CONFIGURED")]
    NotConfigured,

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Transport-level failure reported by a non-reqwest transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend returned a non-success status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Raw response body, or `HTTP <status>` when the body was empty
        message: String,
    },

    /// Payload rejected locally before transmission
    #[error("{0}")]
    Validation(#[from] rotaly_core::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error, falling back to `HTTP <status>` for an
    /// empty body
    pub fn api_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };
        Self::ApiResponse { status, message }
    }

    /// The bare message, without the variant prefix used by `Display`
    ///
    /// For backend errors this is exactly the response body text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotConfigured => NOT_CONFIGURED.to_string(),
            Self::ApiResponse { message, .. } => message.clone(),
            Self::Transport(message) | Self::Config(message) | Self::InvalidUrl(message) => {
                message.clone()
            }
            Self::Validation(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if the request was skipped because the backend is not configured
    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

/// Error context for log lines
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: String,
    /// Table or URL that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (request_id: {})",
            self.method, self.endpoint, self.request_id
        )
    }
}
