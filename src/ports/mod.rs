//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Storage Ports
//!
//! - `ProgressStore` - Snapshots of a trainee's traversal progress

mod event_publisher;
mod event_subscriber;
mod progress_store;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use progress_store::{ProgressKey, ProgressStore, ProgressStoreError};
