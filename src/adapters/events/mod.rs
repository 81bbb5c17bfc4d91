//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus with handler isolation
//! - `TracingEventHandler` - Handler that logs training events

mod in_memory;
mod tracing_handler;

pub use in_memory::InMemoryEventBus;
pub use tracing_handler::TracingEventHandler;
