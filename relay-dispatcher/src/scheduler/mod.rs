//! Scheduler layer for the dispatcher
//!
//! Owns the consume loop: subscribes to the submission topic and hands each
//! payload to the dispatch service, one at a time.

pub mod consumer;

pub use consumer::{ConsumerStats, SubmissionConsumer};
