//! Core domain types
//!
//! Structures shared between the ingestion endpoint (which creates
//! submissions), the dispatcher (which turns them into workflow runs) and
//! the catalog service.

pub mod catalog;
pub mod status;
pub mod submission;
