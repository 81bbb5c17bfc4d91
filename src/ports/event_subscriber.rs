//! EventSubscriber port - Interface for subscribing to training events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// A handler that fails or panics is logged by the bus and skipped; the
/// remaining handlers still receive the event.
///
/// # Example
///
/// ```ignore
/// struct ScoreBoard { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for ScoreBoard {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: TreeCompleted = event.payload_as()?;
///         // Record the final score...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "ScoreBoard"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging and for unsubscribing.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// # Example
///
/// ```ignore
/// subscriber.subscribe(DECISION_MADE, score_board.clone());
/// subscriber.subscribe_all(ALL_TRAINING_EVENTS, audit_log);
/// subscriber.unsubscribe(DECISION_MADE, "ScoreBoard");
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);

    /// Removes every handler with `handler_name` from `event_type`.
    ///
    /// Returns true if at least one handler was removed.
    fn unsubscribe(&self, event_type: &str, handler_name: &str) -> bool;
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}

    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn event_handler_is_send_sync() {
        #[allow(dead_code)]
        fn check<T: EventHandler>() {
            assert_send_sync::<T>();
        }
    }

    #[test]
    fn event_subscriber_is_send_sync() {
        #[allow(dead_code)]
        fn check<T: EventSubscriber>() {
            assert_send_sync::<T>();
        }
    }
}
