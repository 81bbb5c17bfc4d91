//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and event infrastructure
//! that form the vocabulary of the training engine.

mod errors;
mod events;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{DecisionId, OptionId, SessionId, TreeId, UserId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
