//! Error types for the Relay client

use relay_core::dto::submission::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Relay client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// A base URL cannot carry a request path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create an API error from a raw error response body
    ///
    /// Relay services answer with `{error, details?}`; both parts end up in
    /// the message. Other bodies are kept as they are.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                error,
                details: Some(details),
            }) => format!("{}: {}", error, details),
            Ok(ErrorBody { error, .. }) => error,
            Err(_) if body.is_empty() => "Unknown error".to_string(),
            Err(_) => body.to_string(),
        };
        Self::api_error(status, message)
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_with_details() {
        let err = ClientError::from_body(
            400,
            r#"{"error": "Invalid pipeline document", "details": "bad indent"}"#,
        );
        assert_eq!(
            err.to_string(),
            "API error (status 400): Invalid pipeline document: bad indent"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        let err = ClientError::from_body(502, "upstream down");
        assert!(matches!(
            &err,
            ClientError::ApiError { message, .. } if message == "upstream down"
        ));
        assert!(err.is_server_error());

        let err = ClientError::from_body(404, "");
        assert!(err.is_not_found());
        assert!(err.to_string().ends_with("Unknown error"));
    }

    #[test]
    fn test_catalog_not_found_body() {
        let err =
            ClientError::from_body(404, r#"{"error": "Method not found", "method_id": "x"}"#);
        assert!(matches!(
            &err,
            ClientError::ApiError { message, .. } if message == "Method not found"
        ));
    }
}
