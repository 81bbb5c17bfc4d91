//! Training session domain events.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::PerformanceMetrics;
use crate::domain::foundation::{DecisionId, EventId, OptionId, SessionId, Timestamp, TreeId, UserId};
use crate::domain_event;

pub const TREE_INITIALIZED: &str = "training.tree_initialized.v1";
pub const DECISION_MADE: &str = "training.decision_made.v1";
pub const TREE_COMPLETED: &str = "training.tree_completed.v1";
pub const TREE_RESET: &str = "training.tree_reset.v1";

/// Every event type a training session publishes.
pub const ALL_TRAINING_EVENTS: &[&str] = &[TREE_INITIALIZED, DECISION_MADE, TREE_COMPLETED, TREE_RESET];

const AGGREGATE_TYPE: &str = "TrainingSession";

/// A session started on a validated tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeInitialized {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tree_id: TreeId,
    pub user_id: UserId,
    pub start_decision_id: Option<DecisionId>,
    pub max_score: i64,
    pub initialized_at: Timestamp,
}

domain_event!(
    TreeInitialized,
    event_type = TREE_INITIALIZED,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = AGGREGATE_TYPE,
    occurred_at = initialized_at,
    event_id = event_id
);

/// A decision was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionMade {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tree_id: TreeId,
    pub user_id: UserId,
    pub decision_id: DecisionId,
    pub option_id: OptionId,
    pub points: i32,
    pub is_optimal: bool,
    pub total_score: i64,
    pub next_decision_id: Option<DecisionId>,
    pub decided_at: Timestamp,
}

domain_event!(
    DecisionMade,
    event_type = DECISION_MADE,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = AGGREGATE_TYPE,
    occurred_at = decided_at,
    event_id = event_id
);

/// The traversal reached a terminal option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeCompleted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tree_id: TreeId,
    pub user_id: UserId,
    pub metrics: PerformanceMetrics,
    pub completed_at: Timestamp,
}

domain_event!(
    TreeCompleted,
    event_type = TREE_COMPLETED,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = AGGREGATE_TYPE,
    occurred_at = completed_at,
    event_id = event_id
);

/// The session discarded its progress and restarted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeReset {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tree_id: TreeId,
    pub user_id: UserId,
    pub discarded_decisions: usize,
    pub reset_at: Timestamp,
}

domain_event!(
    TreeReset,
    event_type = TREE_RESET,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = AGGREGATE_TYPE,
    occurred_at = reset_at,
    event_id = event_id
);
