//! EventPublisher port - Interface for publishing training events.
//!
//! Sessions publish through this port without knowing which bus, if any,
//! delivers the events.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered in the order they are published
/// - A failing subscriber does not prevent delivery to the others
///
/// # Example
///
/// ```ignore
/// let envelope = EventEnvelope::from_event(&decision_made)?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    ///
    /// Used when one state change produces more than one event, such as the
    /// final decision that also completes the tree.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
