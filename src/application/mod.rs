//! Application layer - Orchestrates domain operations across ports.
//!
//! `TrainingSession` is the entry point: it owns one tree and one progress,
//! and publishes training events as the trainee moves through the tree.

mod errors;
mod training_session;

pub use errors::TrainingError;
pub use training_session::{DecisionOutcome, TrainingSession};
