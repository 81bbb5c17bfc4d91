//! Event handler that writes every training event to the log.

use async_trait::async_trait;

use crate::domain::decision::{DecisionMade, TreeCompleted, DECISION_MADE, TREE_COMPLETED};
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventHandler;

/// Logs training events through `tracing`.
///
/// Decisions and completions get their key fields logged; other event types
/// are logged by type and aggregate only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventHandler;

impl TracingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

fn payload_error(event: &EventEnvelope, e: serde_json::Error) -> DomainError {
    DomainError::new(
        ErrorCode::EventDeliveryFailed,
        format!("Malformed {} payload: {}", event.event_type, e),
    )
    .with_detail("event_id", event.event_id.to_string())
}

#[async_trait]
impl EventHandler for TracingEventHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        match event.event_type.as_str() {
            DECISION_MADE => {
                let made: DecisionMade = event.payload_as().map_err(|e| payload_error(&event, e))?;
                tracing::info!(
                    session_id = %made.session_id,
                    decision_id = %made.decision_id,
                    option_id = %made.option_id,
                    points = made.points,
                    is_optimal = made.is_optimal,
                    total_score = made.total_score,
                    "Decision recorded"
                );
            }
            TREE_COMPLETED => {
                let completed: TreeCompleted =
                    event.payload_as().map_err(|e| payload_error(&event, e))?;
                tracing::info!(
                    session_id = %completed.session_id,
                    tree_id = %completed.tree_id,
                    total_score = completed.metrics.total_score,
                    optimal_rate = %completed.metrics.optimal_rate,
                    "Decision tree completed"
                );
            }
            _ => {
                tracing::info!(
                    event_type = %event.event_type,
                    aggregate_id = %event.aggregate_id,
                    "Training event"
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TracingEventHandler"
    }
}
