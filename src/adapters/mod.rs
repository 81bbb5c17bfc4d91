//! Adapters - Implementations of port interfaces.
//!
//! - `events` - In-memory event bus and a logging handler
//! - `storage` - In-memory and YAML-file progress stores

pub mod events;
pub mod storage;

pub use events::{InMemoryEventBus, TracingEventHandler};
pub use storage::{FileProgressStore, InMemoryProgressStore};
