//! TrainingSession - Drives one trainee through one decision tree.
//!
//! The session owns the tree and its progress. Every state change is
//! published through the `EventPublisher` port; publication failures are
//! logged and never fail the operation that caused them.

use std::sync::Arc;

use serde::Serialize;

use super::errors::TrainingError;
use crate::domain::analysis::{
    calculate_optimal_path, decision_path, improvement_suggestions, DecisionPathEntry,
    ImprovementSuggestion, OptimalPath, PerformanceMetrics,
};
use crate::domain::decision::{
    DecisionMade, DecisionPoint, DecisionTree, DecisionTreeProgress, Evaluation, TreeCompleted,
    TreeDefinition, TreeInitialized, TreeReset,
};
use crate::domain::foundation::{DomainEvent, EventEnvelope, EventId, SessionId, Timestamp, UserId};
use crate::ports::{EventPublisher, ProgressKey, ProgressStore, ProgressStoreError};

/// Result of a successful decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub evaluation: Evaluation,
    /// The point now under the cursor; None once the tree is completed.
    pub next_decision: Option<DecisionPoint>,
    pub is_completed: bool,
    /// Snapshot of the progress after the decision was recorded.
    pub progress: DecisionTreeProgress,
}

pub struct TrainingSession {
    id: SessionId,
    tree: DecisionTree,
    progress: DecisionTreeProgress,
    publisher: Arc<dyn EventPublisher>,
}

impl TrainingSession {
    /// Builds the tree from authored content and starts a session on it.
    pub async fn start(
        definition: TreeDefinition,
        user_id: UserId,
        publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self, TrainingError> {
        Self::with_tree(DecisionTree::from_definition(definition), user_id, publisher).await
    }

    /// Validates the tree and places a fresh progress on its start node.
    ///
    /// # Errors
    ///
    /// `TrainingError::InvalidTree` when validation reports any issue.
    pub async fn with_tree(
        tree: DecisionTree,
        user_id: UserId,
        publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self, TrainingError> {
        let validation = tree.validate();
        if !validation.is_valid {
            tracing::warn!(
                tree_id = %tree.id(),
                issues = validation.errors.len(),
                error = %validation.message(),
                "Rejected invalid decision tree"
            );
            return Err(TrainingError::InvalidTree(validation));
        }

        let progress = DecisionTreeProgress::new(
            user_id,
            tree.id().clone(),
            tree.start_decision_id().cloned(),
        );
        let session = Self {
            id: SessionId::new(),
            tree,
            progress,
            publisher,
        };

        tracing::info!(
            session_id = %session.id,
            tree_id = %session.tree.id(),
            user_id = %session.progress.user_id(),
            "Training session started"
        );

        let initialized = TreeInitialized {
            event_id: EventId::new(),
            session_id: session.id,
            tree_id: session.tree.id().clone(),
            user_id: session.progress.user_id().clone(),
            start_decision_id: session.tree.start_decision_id().cloned(),
            max_score: session.tree.max_score(),
            initialized_at: session.progress.start_time(),
        };
        session.emit(vec![session.envelope(&initialized)]).await;

        Ok(session)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn progress(&self) -> &DecisionTreeProgress {
        &self.progress
    }

    /// The point under the progress cursor, if it resolves.
    pub fn current_decision(&self) -> Option<&DecisionPoint> {
        self.progress
            .current_decision_id()
            .and_then(|id| self.tree.get_decision_point(id.as_str()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Evaluates `option_id` at the current decision and records it.
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` once the tree has been finished
    /// - `NoActiveDecision` when the cursor does not resolve
    /// - `Decision(OptionNotFound)` for an unknown option; progress is unchanged
    pub async fn make_decision(&mut self, option_id: &str) -> Result<DecisionOutcome, TrainingError> {
        let current = self
            .progress
            .current_decision_id()
            .and_then(|id| self.tree.get_decision_point(id.as_str()));
        let Some(point) = current else {
            return Err(if self.progress.is_completed() {
                TrainingError::SessionCompleted
            } else {
                TrainingError::NoActiveDecision
            });
        };

        let decision_id = point.id().clone();
        let evaluation = point.evaluate_decision(option_id).map_err(|e| {
            tracing::debug!(session_id = %self.id, decision_id = %decision_id, option_id, "Unknown option rejected");
            e
        })?;

        let now = Timestamp::now();
        self.progress.record_decision(decision_id.clone(), &evaluation, now);

        // A dangling cursor leaves nothing to decide.
        let cursor_dangles = self
            .progress
            .current_decision_id()
            .is_some_and(|next| self.tree.get_decision_point(next.as_str()).is_none());
        if cursor_dangles {
            self.progress.mark_completed(now);
        }

        let is_completed = self.progress.is_completed();
        tracing::info!(
            session_id = %self.id,
            decision_id = %decision_id,
            option_id,
            points = evaluation.points,
            is_optimal = evaluation.is_optimal,
            total_score = self.progress.total_score(),
            is_completed,
            "Decision made"
        );

        let made = DecisionMade {
            event_id: EventId::new(),
            session_id: self.id,
            tree_id: self.tree.id().clone(),
            user_id: self.progress.user_id().clone(),
            decision_id,
            option_id: evaluation.option.id().clone(),
            points: evaluation.points,
            is_optimal: evaluation.is_optimal,
            total_score: self.progress.total_score(),
            next_decision_id: self.progress.current_decision_id().cloned(),
            decided_at: now,
        };
        let mut events = vec![self.envelope(&made)];

        if is_completed {
            let metrics = self.performance_metrics();
            tracing::info!(
                session_id = %self.id,
                total_score = metrics.total_score,
                optimal_rate = %metrics.optimal_rate,
                score_percentage = %metrics.score_percentage,
                "Decision tree completed"
            );
            let completed = TreeCompleted {
                event_id: EventId::new(),
                session_id: self.id,
                tree_id: self.tree.id().clone(),
                user_id: self.progress.user_id().clone(),
                metrics,
                completed_at: self.progress.end_time().unwrap_or(now),
            };
            events.push(self.envelope(&completed));
        }

        self.emit(events).await;

        Ok(DecisionOutcome {
            evaluation,
            next_decision: self.current_decision().cloned(),
            is_completed,
            progress: self.progress.clone(),
        })
    }

    /// Discards the progress and starts again at the start node.
    pub async fn reset(&mut self) {
        let discarded_decisions = self.progress.decisions().len();
        self.progress = DecisionTreeProgress::new(
            self.progress.user_id().clone(),
            self.tree.id().clone(),
            self.tree.start_decision_id().cloned(),
        );

        tracing::info!(session_id = %self.id, discarded_decisions, "Training session reset");

        let reset = TreeReset {
            event_id: EventId::new(),
            session_id: self.id,
            tree_id: self.tree.id().clone(),
            user_id: self.progress.user_id().clone(),
            discarded_decisions,
            reset_at: self.progress.start_time(),
        };
        self.emit(vec![self.envelope(&reset)]).await;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Analysis
    // ─────────────────────────────────────────────────────────────────────────

    pub fn performance_metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::calculate(&self.tree, &self.progress)
    }

    pub fn decision_path(&self) -> Vec<DecisionPathEntry> {
        decision_path(&self.tree, &self.progress)
    }

    pub fn optimal_path(&self) -> OptimalPath {
        calculate_optimal_path(&self.tree)
    }

    pub fn improvement_suggestions(&self) -> Vec<ImprovementSuggestion> {
        improvement_suggestions(&self.tree, &self.progress)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Writes a snapshot of the progress to `store`.
    pub async fn save_progress(&self, store: &dyn ProgressStore) -> Result<(), TrainingError> {
        store.save(&self.progress).await?;
        tracing::debug!(session_id = %self.id, decisions = self.progress.decisions().len(), "Progress saved");
        Ok(())
    }

    /// Replaces the progress with the stored snapshot for this tree and user.
    ///
    /// Returns false, leaving the progress untouched, when no matching
    /// snapshot exists.
    pub async fn load_progress(&mut self, store: &dyn ProgressStore) -> Result<bool, TrainingError> {
        let key = ProgressKey::for_progress(&self.progress);
        let snapshot = match store.load(&key).await {
            Ok(snapshot) => snapshot,
            Err(ProgressStoreError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if snapshot.decision_tree_id() != self.tree.id() || snapshot.user_id() != self.progress.user_id() {
            tracing::warn!(session_id = %self.id, key = %key, "Ignoring snapshot for a different tree or user");
            return Ok(false);
        }

        self.progress = snapshot;
        tracing::debug!(session_id = %self.id, decisions = self.progress.decisions().len(), "Progress loaded");
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    fn envelope<E: DomainEvent + Serialize>(&self, event: &E) -> Option<EventEnvelope> {
        match EventEnvelope::from_event(event) {
            Ok(envelope) => Some(envelope.with_user_id(self.progress.user_id().to_string())),
            Err(e) => {
                tracing::warn!(
                    session_id = %self.id,
                    event_type = event.event_type(),
                    error = %e,
                    "Failed to serialize event"
                );
                None
            }
        }
    }

    async fn emit(&self, events: Vec<Option<EventEnvelope>>) {
        let mut events: Vec<EventEnvelope> = events.into_iter().flatten().collect();
        let result = match events.len() {
            0 => return,
            1 => match events.pop() {
                Some(event) => self.publisher.publish(event).await,
                None => return,
            },
            _ => self.publisher.publish_all(events).await,
        };

        if let Err(e) = result {
            tracing::warn!(session_id = %self.id, error = %e, "Failed to publish training events");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::domain::decision::{
        DecisionOption, DECISION_MADE, TREE_COMPLETED, TREE_INITIALIZED, TREE_RESET,
    };
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;

    fn tree() -> DecisionTree {
        DecisionTree::new(
            "phishing-101",
            "Phishing intake",
            vec![
                DecisionPoint::new("decision-1", "Golden hour", "S")
                    .with_option(
                        DecisionOption::new("escalate", "Escalate", 10)
                            .leads_to("decision-2")
                            .optimal(),
                    )
                    .with_option(DecisionOption::new("wait", "Wait", -5).leads_to("decision-2")),
                DecisionPoint::new("decision-2", "Evidence", "S")
                    .with_option(DecisionOption::new("preserve", "Preserve", 15).optimal()),
            ],
            None,
        )
    }

    fn user() -> UserId {
        UserId::new("officer-7").unwrap()
    }

    async fn session() -> (TrainingSession, Arc<InMemoryEventBus>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let session = TrainingSession::with_tree(tree(), user(), bus.clone()).await.unwrap();
        (session, bus)
    }

    struct RejectingPublisher;

    #[async_trait]
    impl EventPublisher for RejectingPublisher {
        async fn publish(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::EventDeliveryFailed, "bus down"))
        }

        async fn publish_all(&self, _: Vec<EventEnvelope>) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::EventDeliveryFailed, "bus down"))
        }
    }

    #[tokio::test]
    async fn start_publishes_initialized_event() {
        let (session, bus) = session().await;

        assert_eq!(session.current_decision().map(|p| p.id().as_str()), Some("decision-1"));
        let events = bus.events_of_type(TREE_INITIALIZED);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, session.id().to_string());
        assert_eq!(events[0].metadata.user_id.as_deref(), Some("officer-7"));
    }

    #[tokio::test]
    async fn optimal_run_scores_twenty_five_and_completes() {
        let (mut session, bus) = session().await;

        let first = session.make_decision("escalate").await.unwrap();
        assert!(!first.is_completed);
        assert_eq!(first.next_decision.map(|p| p.id().to_string()), Some("decision-2".to_string()));

        let second = session.make_decision("preserve").await.unwrap();
        assert!(second.is_completed);
        assert!(second.next_decision.is_none());
        assert_eq!(second.progress.total_score(), 25);
        assert_eq!(second.progress.decisions().len(), 2);

        assert_eq!(bus.events_of_type(DECISION_MADE).len(), 2);
        assert_eq!(bus.events_of_type(TREE_COMPLETED).len(), 1);
    }

    #[tokio::test]
    async fn unknown_option_leaves_progress_untouched() {
        let (mut session, bus) = session().await;
        let before = session.progress().clone();

        let err = session.make_decision("nonexistent").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::OptionNotFound);
        assert_eq!(session.progress(), &before);
        assert!(!bus.has_event(DECISION_MADE));
    }

    #[tokio::test]
    async fn deciding_after_completion_is_rejected() {
        let (mut session, _) = session().await;
        session.make_decision("escalate").await.unwrap();
        session.make_decision("preserve").await.unwrap();

        let err = session.make_decision("preserve").await.unwrap_err();
        assert!(matches!(err, TrainingError::SessionCompleted));
    }

    #[tokio::test]
    async fn reset_starts_over() {
        let (mut session, bus) = session().await;
        session.make_decision("wait").await.unwrap();

        session.reset().await;

        assert!(session.progress().decisions().is_empty());
        assert_eq!(session.progress().total_score(), 0);
        assert_eq!(session.current_decision().map(|p| p.id().as_str()), Some("decision-1"));
        assert_eq!(bus.events_of_type(TREE_RESET).len(), 1);
    }

    #[tokio::test]
    async fn invalid_tree_is_rejected_before_progress() {
        let broken = DecisionTree::new(
            "broken",
            "Broken",
            vec![DecisionPoint::new("a", "A", "S").with_option(DecisionOption::new("x", "X", 1))],
            Some("missing".into()),
        );
        let bus = Arc::new(InMemoryEventBus::new());

        let result = TrainingSession::with_tree(broken, user(), bus.clone()).await;

        match result {
            Err(TrainingError::InvalidTree(validation)) => {
                assert!(validation.message().contains("missing"));
            }
            _ => panic!("expected InvalidTree"),
        }
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn publisher_failures_do_not_fail_decisions() {
        let mut session = TrainingSession::with_tree(tree(), user(), Arc::new(RejectingPublisher))
            .await
            .unwrap();

        let outcome = session.make_decision("escalate").await.unwrap();
        assert_eq!(outcome.progress.total_score(), 10);
    }

    #[tokio::test]
    async fn analysis_reflects_choices() {
        let (mut session, _) = session().await;
        session.make_decision("wait").await.unwrap();
        session.make_decision("preserve").await.unwrap();

        let metrics = session.performance_metrics();
        assert_eq!(metrics.total_decisions, 2);
        assert_eq!(metrics.optimal_decisions, 1);
        assert_eq!(metrics.total_score, 10);

        let path = session.decision_path();
        assert_eq!(path[0].option_id.as_str(), "wait");
        assert_eq!(session.optimal_path().total_points, 25);
        assert_eq!(session.improvement_suggestions().len(), 2);
    }
}
