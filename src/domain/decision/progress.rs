//! DecisionTreeProgress - one user's traversal of one decision tree.
//!
//! # Invariants
//!
//! - `total_score` equals the sum of `points` over `decisions`
//! - `is_completed` flips to true at most once, and `end_time` is set at that
//!   moment and never changed afterwards
//! - once completed no further decisions are recorded

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::option::Consequence;
use super::point::Evaluation;
use crate::domain::foundation::{DecisionId, OptionId, Timestamp, TreeId, UserId};

/// One entry of the decision log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub decision_id: DecisionId,
    pub option_id: OptionId,
    pub timestamp: Timestamp,
    pub points: i32,
    pub feedback: String,
    pub consequences: Vec<Consequence>,
    pub is_optimal: bool,
}

/// Mutable session state for a tree traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTreeProgress {
    user_id: UserId,
    decision_tree_id: TreeId,
    current_decision_id: Option<DecisionId>,
    decisions: Vec<DecisionRecord>,
    total_score: i64,
    start_time: Timestamp,
    end_time: Option<Timestamp>,
    is_completed: bool,
    #[serde(default)]
    metadata: Map<String, JsonValue>,
}

impl DecisionTreeProgress {
    /// Starts a traversal with the cursor on `start`.
    ///
    /// A missing start leaves nothing to decide, so the progress begins completed.
    pub fn new(user_id: UserId, decision_tree_id: TreeId, start: Option<DecisionId>) -> Self {
        Self::started_at(user_id, decision_tree_id, start, Timestamp::now())
    }

    pub fn started_at(
        user_id: UserId,
        decision_tree_id: TreeId,
        start: Option<DecisionId>,
        start_time: Timestamp,
    ) -> Self {
        let mut progress = Self {
            user_id,
            decision_tree_id,
            current_decision_id: start,
            decisions: Vec::new(),
            total_score: 0,
            start_time,
            end_time: None,
            is_completed: false,
            metadata: Map::new(),
        };
        if progress.current_decision_id.is_none() {
            progress.mark_completed(start_time);
        }
        progress
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn decision_tree_id(&self) -> &TreeId {
        &self.decision_tree_id
    }

    pub fn current_decision_id(&self) -> Option<&DecisionId> {
        self.current_decision_id.as_ref()
    }

    pub fn decisions(&self) -> &[DecisionRecord] {
        &self.decisions
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.end_time
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn metadata(&self) -> &Map<String, JsonValue> {
        &self.metadata
    }

    /// Recomputes the score from the log; equals `total_score` when consistent.
    pub fn replayed_score(&self) -> i64 {
        self.decisions.iter().map(|d| i64::from(d.points)).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends an evaluated decision, updates the score and moves the cursor.
    ///
    /// A decision without a next id completes the traversal. Recording on a
    /// completed progress is ignored and returns None.
    pub fn record_decision(
        &mut self,
        decision_id: DecisionId,
        evaluation: &Evaluation,
        at: Timestamp,
    ) -> Option<&DecisionRecord> {
        if self.is_completed {
            return None;
        }

        self.decisions.push(DecisionRecord {
            decision_id,
            option_id: evaluation.option.id().clone(),
            timestamp: at,
            points: evaluation.points,
            feedback: evaluation.feedback.clone(),
            consequences: evaluation.consequences.clone(),
            is_optimal: evaluation.is_optimal,
        });
        self.total_score += i64::from(evaluation.points);
        self.current_decision_id = evaluation.next_decision_id.clone();

        if self.current_decision_id.is_none() {
            self.mark_completed(at);
        }
        self.decisions.last()
    }

    /// Marks the traversal finished. The first call wins; later calls are no-ops.
    pub fn mark_completed(&mut self, at: Timestamp) {
        if self.is_completed {
            return;
        }
        self.is_completed = true;
        self.end_time = Some(at);
        self.current_decision_id = None;
    }

    pub fn insert_metadata(&mut self, key: impl Into<String>, value: JsonValue) {
        self.metadata.insert(key.into(), value);
    }
}
