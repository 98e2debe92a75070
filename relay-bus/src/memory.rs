//! In-memory transport
//!
//! Each topic is a tokio broadcast channel. Semantics match the Redis
//! transport: no backlog, no replay, publishing without subscribers
//! succeeds, and closing the bus ends every open subscription.

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::broadcast;

use crate::error::{BusError, Result};
use crate::{EventBus, Subscription};

const DEFAULT_CAPACITY: usize = 1024;

/// In-process event bus
pub struct MemoryBus {
    topics: Mutex<HashMap<String, broadcast::Sender<Vec<u8>>>>,
    capacity: usize,
    closed: AtomicBool,
    outage: AtomicBool,
    published: AtomicUsize,
}

impl MemoryBus {
    /// Creates a bus whose topics buffer up to 1024 undelivered payloads
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus with a custom per-topic buffer size
    ///
    /// Subscribers that fall further behind than `capacity` lose payloads.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            closed: AtomicBool::new(false),
            outage: AtomicBool::new(false),
            published: AtomicUsize::new(0),
        }
    }

    /// Number of subscriptions currently open on a topic
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .get(topic)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Total payloads accepted by `publish`
    pub fn published_count(&self) -> usize {
        self.published.load(Ordering::Relaxed)
    }

    /// Closes the bus.
    ///
    /// Open subscriptions yield what is already buffered and then end;
    /// further publishes and subscribes fail with [`BusError::Closed`].
    pub fn close(&self) {
        let mut topics = self.topics.lock();
        self.closed.store(true, Ordering::SeqCst);
        topics.clear();
    }

    /// Simulates a transport outage.
    ///
    /// While set, publishes fail and the health check reports unhealthy;
    /// open subscriptions stay attached.
    pub fn set_outage(&self, outage: bool) {
        self.outage.store(outage, Ordering::SeqCst);
    }

    /// Sender for a topic, created on first use.
    ///
    /// `closed` is checked under the topics lock so no topic is created
    /// after `close` has cleared the map.
    fn sender(&self, topic: &str) -> Result<broadcast::Sender<Vec<u8>>> {
        let mut topics = self.topics.lock();
        if self.closed.load(Ordering::SeqCst) {
            return Err(BusError::Closed);
        }

        Ok(topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BusError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for MemoryBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        self.ensure_open()?;
        if self.outage.load(Ordering::SeqCst) {
            return Err(BusError::publish(topic, "simulated outage"));
        }

        // A send error only means nobody is subscribed; the payload is dropped.
        if self.sender(topic)?.send(payload).is_err() {
            tracing::debug!(topic = %topic, "Published with no subscribers attached");
        }
        self.published.fetch_add(1, Ordering::Relaxed);

        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription> {
        let receiver = self.sender(topic)?.subscribe();
        let topic = topic.to_string();

        let stream = futures::stream::unfold(receiver, move |mut receiver| {
            let topic = topic.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(payload) => return Some((payload, receiver)),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                topic = %topic,
                                skipped,
                                "Subscriber lagged, payloads dropped"
                            );
                        }
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            }
        });

        Ok(stream.boxed())
    }

    async fn health_check(&self) -> bool {
        !self.closed.load(Ordering::SeqCst) && !self.outage.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = MemoryBus::new();
        let mut events = bus.subscribe("t").await.unwrap();

        bus.publish("t", b"one".to_vec()).await.unwrap();
        bus.publish("t", b"two".to_vec()).await.unwrap();

        assert_eq!(events.next().await.unwrap(), b"one");
        assert_eq!(events.next().await.unwrap(), b"two");
        assert_eq!(bus.published_count(), 2);
    }

    #[tokio::test]
    async fn test_publish_without_subscriber_succeeds() {
        let bus = MemoryBus::new();
        assert!(bus.publish("nobody", b"lost".to_vec()).await.is_ok());
        assert_eq!(bus.subscriber_count("nobody"), 0);
    }

    #[tokio::test]
    async fn test_no_replay_for_late_subscribers() {
        let bus = MemoryBus::new();
        let mut early = bus.subscribe("t").await.unwrap();
        bus.publish("t", b"before".to_vec()).await.unwrap();

        let mut late = bus.subscribe("t").await.unwrap();
        bus.publish("t", b"after".to_vec()).await.unwrap();

        assert_eq!(early.next().await.unwrap(), b"before");
        assert_eq!(early.next().await.unwrap(), b"after");
        assert_eq!(late.next().await.unwrap(), b"after");
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let bus = MemoryBus::new();
        let mut a = bus.subscribe("a").await.unwrap();
        let _b = bus.subscribe("b").await.unwrap();

        bus.publish("b", b"for-b".to_vec()).await.unwrap();
        bus.publish("a", b"for-a".to_vec()).await.unwrap();

        assert_eq!(a.next().await.unwrap(), b"for-a");
        assert_eq!(bus.subscriber_count("a"), 1);
        assert_eq!(bus.subscriber_count("b"), 1);
    }

    #[tokio::test]
    async fn test_close_ends_subscriptions() {
        let bus = MemoryBus::new();
        let mut events = bus.subscribe("t").await.unwrap();
        bus.publish("t", b"buffered".to_vec()).await.unwrap();

        bus.close();

        assert_eq!(events.next().await.unwrap(), b"buffered");
        assert!(events.next().await.is_none());
        assert!(matches!(
            bus.publish("t", b"x".to_vec()).await,
            Err(BusError::Closed)
        ));
        assert!(matches!(bus.subscribe("t").await, Err(BusError::Closed)));
        assert!(!bus.health_check().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_close_racing_subscribe_ends_every_subscription() {
        use std::sync::Arc;
        use std::time::Duration;

        for _ in 0..50 {
            let bus = Arc::new(MemoryBus::new());
            let subscribers: Vec<_> = (0..8)
                .map(|i| {
                    let bus = bus.clone();
                    tokio::spawn(async move { bus.subscribe(&format!("t{}", i % 2)).await })
                })
                .collect();

            bus.close();

            for subscriber in subscribers {
                if let Ok(mut events) = subscriber.await.unwrap() {
                    let next = tokio::time::timeout(Duration::from_secs(1), events.next())
                        .await
                        .expect("subscription stayed open after close");
                    assert!(next.is_none());
                }
            }
            assert_eq!(bus.subscriber_count("t0"), 0);
            assert_eq!(bus.subscriber_count("t1"), 0);
        }
    }

    #[tokio::test]
    async fn test_outage_fails_publishes_only() {
        let bus = MemoryBus::new();
        let mut events = bus.subscribe("t").await.unwrap();

        bus.set_outage(true);
        assert!(matches!(
            bus.publish("t", b"x".to_vec()).await,
            Err(BusError::PublishFailed { .. })
        ));
        assert!(!bus.health_check().await);
        assert_eq!(bus.published_count(), 0);

        bus.set_outage(false);
        bus.publish("t", b"y".to_vec()).await.unwrap();
        assert_eq!(events.next().await.unwrap(), b"y");
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_and_continues() {
        let bus = MemoryBus::with_capacity(2);
        let mut events = bus.subscribe("t").await.unwrap();

        for i in 0..5u8 {
            bus.publish("t", vec![i]).await.unwrap();
        }

        assert_eq!(events.next().await.unwrap(), vec![3]);
        assert_eq!(events.next().await.unwrap(), vec![4]);
    }
}
