//! Submission consumer
//!
//! Subscribes to the submission topic and dispatches every payload in
//! arrival order. Each event runs to completion before the next is read.
//! The loop only ends when the subscription does, which is reported as an
//! error so the process exits non-zero.

use anyhow::{Context, Result};
use futures::StreamExt;
use parking_lot::Mutex;
use relay_bus::EventBus;
use relay_core::dto::event::SUBMITTED_TOPIC;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

use crate::service::{DispatchService, Outcome, SkipReason};

/// Counters over the lifetime of one consume loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerStats {
    pub received: u64,
    pub dispatched: u64,
    pub malformed: u64,
    pub start_failed: u64,
    /// Dispatched runs whose started confirmation was lost
    pub confirm_failed: u64,
}

impl ConsumerStats {
    /// Counts one processed payload
    pub fn record(&mut self, outcome: &Outcome) {
        self.received += 1;
        match outcome {
            Outcome::Dispatched { confirmed, .. } => {
                self.dispatched += 1;
                if !confirmed {
                    self.confirm_failed += 1;
                }
            }
            Outcome::Skipped(SkipReason::Malformed(_)) => self.malformed += 1,
            Outcome::Skipped(SkipReason::StartFailed { .. }) => self.start_failed += 1,
        }
    }
}

/// Consume loop over the submission topic
pub struct SubmissionConsumer {
    bus: Arc<dyn EventBus>,
    dispatcher: Arc<dyn DispatchService>,
    stats: Mutex<ConsumerStats>,
    subscribed: AtomicBool,
    terminated: AtomicBool,
}

impl SubmissionConsumer {
    /// Creates a new consumer
    pub fn new(bus: Arc<dyn EventBus>, dispatcher: Arc<dyn DispatchService>) -> Self {
        Self {
            bus,
            dispatcher,
            stats: Mutex::new(ConsumerStats::default()),
            subscribed: AtomicBool::new(false),
            terminated: AtomicBool::new(false),
        }
    }

    /// Snapshot of the counters so far
    pub fn stats(&self) -> ConsumerStats {
        *self.stats.lock()
    }

    /// Whether the subscription is currently open
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }

    /// Whether `run` has returned; the consumer never resumes afterwards
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Bus the consumer reads from
    pub fn bus(&self) -> &Arc<dyn EventBus> {
        &self.bus
    }

    /// Runs the consume loop
    ///
    /// Returns only on failure: either the subscription cannot be opened or
    /// the subscription stream ended.
    pub async fn run(&self) -> Result<()> {
        info!("Subscribing to {}", SUBMITTED_TOPIC);

        let mut events = match self.bus.subscribe(SUBMITTED_TOPIC).await {
            Ok(events) => events,
            Err(e) => {
                self.terminated.store(true, Ordering::SeqCst);
                return Err(e).context("Failed to subscribe to submission topic");
            }
        };

        self.subscribed.store(true, Ordering::SeqCst);
        info!("Waiting for pipeline submissions");

        while let Some(payload) = events.next().await {
            debug!("Received {} byte payload", payload.len());

            let outcome = self.dispatcher.dispatch(&payload).await;
            self.stats.lock().record(&outcome);
        }

        self.subscribed.store(false, Ordering::SeqCst);
        self.terminated.store(true, Ordering::SeqCst);

        let stats = self.stats();
        error!(
            received = stats.received,
            dispatched = stats.dispatched,
            malformed = stats.malformed,
            start_failed = stats.start_failed,
            confirm_failed = stats.confirm_failed,
            "Submission stream ended"
        );

        anyhow::bail!(
            "submission stream ended after {} event(s)",
            stats.received
        )
    }
}
