//! Relay Event Bus
//!
//! A uniform publish/subscribe contract that decouples the ingestion
//! endpoint and the dispatcher from the concrete transport.
//!
//! The bus is non-persistent and at-most-once:
//! - publishing to a topic nobody listens on succeeds and the payload is lost
//! - a subscription only sees payloads published after it was opened
//! - a lost connection ends the subscription stream; there is no reconnect
//!
//! Two transports are provided:
//! - [`RedisBus`]: Redis `PUBLISH`/`SUBSCRIBE`
//! - [`MemoryBus`]: in-process broadcast channels for local runs and tests
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use relay_bus::{EventBus, RedisBus};
//!
//! # async fn example() -> relay_bus::Result<()> {
//! let bus = RedisBus::connect("redis://localhost:6379").await?;
//! let mut events = bus.subscribe("pipeline.submitted").await?;
//!
//! bus.publish("pipeline.submitted", b"{}".to_vec()).await?;
//! while let Some(payload) = events.next().await {
//!     println!("received {} bytes", payload.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod memory;
mod redis_bus;

pub use error::{BusError, Result};
pub use memory::MemoryBus;
pub use redis_bus::RedisBus;

use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy, non-restartable sequence of payloads received on one topic.
///
/// The stream ends when the underlying connection is lost or the bus is
/// closed. Consumers must treat the end of the stream as fatal.
pub type Subscription = BoxStream<'static, Vec<u8>>;

/// Publish/subscribe transport shared by Relay services
///
/// Implementations must be safe for concurrent use by many publishers.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publishes a payload to a topic
    ///
    /// Succeeds even when no subscriber is attached.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;

    /// Opens a subscription to a topic
    async fn subscribe(&self, topic: &str) -> Result<Subscription>;

    /// Checks whether the transport is reachable
    async fn health_check(&self) -> bool;
}
