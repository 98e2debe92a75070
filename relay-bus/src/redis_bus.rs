//! Redis pub/sub transport
//!
//! Publishing goes through a shared, auto-reconnecting connection manager so
//! concurrent request handlers can publish without coordination. Every
//! subscription opens its own dedicated pub/sub connection; when that
//! connection drops the subscription stream ends.

use async_trait::async_trait;
use futures::StreamExt;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::error::{BusError, Result};
use crate::{EventBus, Subscription};

/// Event bus backed by Redis `PUBLISH`/`SUBSCRIBE`
#[derive(Clone)]
pub struct RedisBus {
    client: redis::Client,
    publisher: ConnectionManager,
}

impl RedisBus {
    /// Connects to Redis and verifies the connection with a `PING`
    ///
    /// # Arguments
    /// * `url` - Redis URL (e.g., "redis://localhost:6379")
    pub async fn connect(url: &str) -> Result<Self> {
        let client =
            redis::Client::open(url).map_err(|e| BusError::ConnectionFailed(e.to_string()))?;

        let mut publisher = client
            .get_connection_manager()
            .await
            .map_err(|e| BusError::ConnectionFailed(e.to_string()))?;

        redis::cmd("PING")
            .query_async::<String>(&mut publisher)
            .await
            .map_err(|e| BusError::ConnectionFailed(e.to_string()))?;

        tracing::info!(url = %url, "Connected to Redis");

        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl EventBus for RedisBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        let mut conn = self.publisher.clone();

        let receivers: i64 = conn
            .publish(topic, payload)
            .await
            .map_err(|e| BusError::publish(topic, e))?;

        if receivers == 0 {
            tracing::debug!(topic = %topic, "Published with no subscribers attached");
        }

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| BusError::subscribe(topic, e))?;

        pubsub
            .subscribe(topic)
            .await
            .map_err(|e| BusError::subscribe(topic, e))?;

        tracing::info!(topic = %topic, "Subscribed to Redis channel");

        let stream = pubsub
            .into_on_message()
            .map(|msg| msg.get_payload_bytes().to_vec());

        Ok(stream.boxed())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.publisher.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }
}
