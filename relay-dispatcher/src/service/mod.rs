//! Service layer
//!
//! Services contain the dispatcher's business logic. They are trait-based
//! so the consume loop can be driven with test doubles.

mod dispatch;

pub use dispatch::{DispatchService, DispatchSettings, Outcome, SkipReason};
pub use dispatch::StandardDispatchService;
