//! Data Transfer Objects
//!
//! Wire records exchanged over the event bus and HTTP bodies exchanged
//! between Relay services and their clients.

pub mod catalog;
pub mod event;
pub mod submission;
