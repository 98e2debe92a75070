//! Relay Ingestion Endpoint
//!
//! Accepts pipeline documents over HTTP, publishes a submission event for
//! each one and acknowledges immediately. Starting the workflow run is left
//! to the dispatcher on the other side of the bus.
//!
//! Also answers status queries by asking the workflow engine to describe
//! the run keyed by the pipeline id.

pub mod api;
pub mod config;
pub mod service;

pub use api::{AppState, create_router};
pub use config::Config;
