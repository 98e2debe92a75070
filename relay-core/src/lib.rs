//! Relay Core
//!
//! Core types shared by the Relay submission pipeline.
//!
//! This crate contains:
//! - Domain types: pipeline submissions, catalog records, run status
//! - DTOs: bus event records and HTTP request/response bodies

pub mod domain;
pub mod dto;
