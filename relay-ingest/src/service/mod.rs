//! Service Module
//!
//! Business logic for the ingest service, kept free of HTTP concerns.

pub mod status;
pub mod submission;

// Re-export for convenience
pub use status as status_service;
pub use submission as submission_service;
