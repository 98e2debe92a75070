//! Relay Dispatcher
//!
//! Consumes submission events from the bus and turns each one into a
//! durable workflow run.
//!
//! Architecture:
//! - Configuration: settings from environment or defaults
//! - Services: decoding one event, starting its run, confirming the start
//! - Scheduler: the consume loop over the submission topic
//! - Health: a small HTTP server reporting liveness and counters
//!
//! Events are processed one at a time. A malformed event or a failed start
//! is logged and skipped; losing the subscription ends the process.

pub mod config;
pub mod health;
pub mod scheduler;
pub mod service;
pub mod startup;

pub use config::Config;
pub use scheduler::{ConsumerStats, SubmissionConsumer};
pub use service::{
    DispatchService, DispatchSettings, Outcome, SkipReason, StandardDispatchService,
};
