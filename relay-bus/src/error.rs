//! Error types for the event bus

use thiserror::Error;

/// Result type alias for bus operations
pub type Result<T> = std::result::Result<T, BusError>;

/// Transport errors raised by an [`EventBus`](crate::EventBus)
#[derive(Debug, Error)]
pub enum BusError {
    /// Could not reach the transport
    #[error("Bus connection failed: {0}")]
    ConnectionFailed(String),

    /// Publishing a payload failed
    #[error("Publish to '{topic}' failed: {message}")]
    PublishFailed {
        /// Target topic
        topic: String,
        /// Transport error message
        message: String,
    },

    /// Opening a subscription failed
    #[error("Subscribe to '{topic}' failed: {message}")]
    SubscribeFailed {
        /// Target topic
        topic: String,
        /// Transport error message
        message: String,
    },

    /// The bus has been closed
    #[error("Bus is closed")]
    Closed,
}

impl BusError {
    pub(crate) fn publish(topic: &str, message: impl ToString) -> Self {
        Self::PublishFailed {
            topic: topic.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn subscribe(topic: &str, message: impl ToString) -> Self {
        Self::SubscribeFailed {
            topic: topic.to_string(),
            message: message.to_string(),
        }
    }
}
