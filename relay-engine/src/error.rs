//! Error types for workflow engine calls

use std::time::Duration;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned by a [`WorkflowEngine`](crate::WorkflowEngine)
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be reached
    #[error("Workflow engine unavailable: {0}")]
    Unavailable(String),

    /// A run with this id is already running
    #[error("Workflow run '{0}' is already started")]
    AlreadyStarted(String),

    /// No run with this id exists
    #[error("Workflow run '{0}' not found")]
    NotFound(String),

    /// The engine refused the request
    #[error("Workflow engine rejected request (status {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the engine
        message: String,
    },

    /// The engine did not answer in time
    #[error("Workflow engine call timed out after {0:?}")]
    Timeout(Duration),

    /// The configured engine URL cannot address a run
    #[error("Invalid workflow engine URL: {0}")]
    InvalidUrl(String),

    /// The engine answered with something we could not interpret
    #[error("Invalid workflow engine response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EngineError::InvalidResponse(err.to_string())
        } else {
            EngineError::Unavailable(err.to_string())
        }
    }
}

impl EngineError {
    /// Whether the error means the engine itself is unhealthy rather than
    /// the request being refused
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
            || matches!(self, Self::Rejected { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(EngineError::Unavailable("down".into()).is_unavailable());
        assert!(EngineError::Timeout(Duration::from_secs(1)).is_unavailable());
        assert!(
            EngineError::Rejected {
                status: 503,
                message: "busy".into()
            }
            .is_unavailable()
        );
        assert!(
            !EngineError::Rejected {
                status: 400,
                message: "bad".into()
            }
            .is_unavailable()
        );
        assert!(!EngineError::AlreadyStarted("p1".into()).is_unavailable());
        assert!(!EngineError::NotFound("p1".into()).is_unavailable());
    }
}
