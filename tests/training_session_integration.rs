//! Integration tests for training sessions.
//!
//! These tests verify the end-to-end flow:
//! 1. Authored JSON/YAML or a generated scenario becomes a validated tree
//! 2. A session walks the tree, recording and scoring decisions
//! 3. Events reach subscribers, even when other subscribers fail
//! 4. Progress snapshots survive a round trip through the stores

use async_trait::async_trait;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use cyberdrill::adapters::{FileProgressStore, InMemoryEventBus, InMemoryProgressStore};
use cyberdrill::application::{TrainingError, TrainingSession};
use cyberdrill::domain::decision::{
    TreeDefinition, ALL_TRAINING_EVENTS, DECISION_MADE, TREE_COMPLETED, TREE_INITIALIZED,
};
use cyberdrill::domain::foundation::{DomainError, ErrorCode, EventEnvelope, UserId};
use cyberdrill::domain::scenario::{ScenarioGenerator, ScenarioOptions};
use cyberdrill::ports::{EventHandler, EventSubscriber, ProgressKey, ProgressStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TWO_NODE_TREE: &str = r#"{
    "id": "upi-fraud",
    "title": "UPI fraud walk-in",
    "decisionPoints": [
        {
            "id": "decision-1",
            "title": "Golden hour",
            "scenario": "The victim lost money twenty minutes ago.",
            "timeLimit": 120,
            "options": [
                { "id": "escalate", "text": "Report on 1930", "points": 10, "isOptimal": true,
                  "nextDecisionId": "decision-2", "feedback": "Fast reporting freezes funds." },
                { "id": "wait", "text": "Wait for the bank", "points": -5,
                  "nextDecisionId": "decision-2", "category": "wait" }
            ]
        },
        {
            "id": "decision-2",
            "title": "Preserve evidence",
            "scenario": "The phone still has the remote-access app.",
            "options": [
                { "id": "preserve", "text": "Preserve the device", "points": 15, "isOptimal": true }
            ]
        }
    ]
}"#;

const TWO_NODE_YAML: &str = r#"
id: upi-fraud-yaml
title: UPI fraud walk-in
decisionPoints:
  - id: decision-1
    title: Golden hour
    scenario: The victim lost money twenty minutes ago.
    options:
      - id: escalate
        text: Report on 1930
        points: 10
        isOptimal: true
        nextDecisionId: decision-2
  - id: decision-2
    title: Preserve evidence
    scenario: The phone still has the remote-access app.
    options:
      - id: preserve
        text: Preserve the device
        points: 15
"#;

fn definition() -> TreeDefinition {
    TreeDefinition::from_json(TWO_NODE_TREE).unwrap()
}

fn user() -> UserId {
    UserId::new("officer-7").unwrap()
}

async fn start() -> (TrainingSession, Arc<InMemoryEventBus>) {
    let bus = Arc::new(InMemoryEventBus::new());
    let session = TrainingSession::start(definition(), user(), bus.clone())
        .await
        .unwrap();
    (session, bus)
}

struct CountingHandler(Arc<AtomicUsize>);

#[async_trait]
impl EventHandler for CountingHandler {
    async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CountingHandler"
    }
}

struct FailingHandler;

#[async_trait]
impl EventHandler for FailingHandler {
    async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::InternalError, "subscriber exploded"))
    }

    fn name(&self) -> &'static str {
        "FailingHandler"
    }
}

struct PanickingHandler;

#[async_trait]
impl EventHandler for PanickingHandler {
    async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
        panic!("subscriber panicked");
    }

    fn name(&self) -> &'static str {
        "PanickingHandler"
    }
}

// =============================================================================
// Traversal
// =============================================================================

#[tokio::test]
async fn two_node_walkthrough_scores_twenty_five() {
    let (mut session, bus) = start().await;
    assert_eq!(
        session.current_decision().map(|p| p.id().as_str()),
        Some("decision-1")
    );

    session.make_decision("escalate").await.unwrap();
    let outcome = session.make_decision("preserve").await.unwrap();

    assert_eq!(outcome.progress.total_score(), 25);
    assert!(outcome.is_completed);
    assert_eq!(outcome.progress.decisions().len(), 2);
    assert!(session.current_decision().is_none());

    assert!(bus.has_event(TREE_INITIALIZED));
    assert_eq!(bus.events_of_type(DECISION_MADE).len(), 2);
    assert_eq!(bus.events_of_type(TREE_COMPLETED).len(), 1);
    assert_eq!(bus.events_for_aggregate(&session.id().to_string()).len(), 4);
}

#[tokio::test]
async fn yaml_definitions_play_the_same_way() {
    let bus = Arc::new(InMemoryEventBus::new());
    let definition = TreeDefinition::from_yaml(TWO_NODE_YAML).unwrap();
    let mut session = TrainingSession::start(definition, user(), bus).await.unwrap();

    session.make_decision("escalate").await.unwrap();
    let outcome = session.make_decision("preserve").await.unwrap();

    assert_eq!(outcome.progress.total_score(), 25);
    assert!(outcome.is_completed);
}

#[tokio::test]
async fn evaluation_copies_option_fields() {
    let (mut session, _) = start().await;

    let outcome = session.make_decision("escalate").await.unwrap();

    assert_eq!(outcome.evaluation.points, 10);
    assert_eq!(outcome.evaluation.feedback, "Fast reporting freezes funds.");
    assert_eq!(
        outcome.evaluation.next_decision_id.as_ref().map(|d| d.as_str()),
        Some("decision-2")
    );
    assert!(outcome.evaluation.is_optimal);
}

#[tokio::test]
async fn missing_start_fails_before_any_progress() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut definition = definition();
    definition.start_decision_id = Some("missing".into());

    let result = TrainingSession::start(definition, user(), bus.clone()).await;

    assert!(matches!(result, Err(TrainingError::InvalidTree(_))));
    assert_eq!(bus.event_count(), 0);
}

#[tokio::test]
async fn dangling_next_id_fails_to_start() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut definition = definition();
    definition.decision_points[1].options[0].next_decision_id = Some("decision-9".into());

    let result = TrainingSession::start(definition, user(), bus).await;

    match result {
        Err(TrainingError::InvalidTree(validation)) => {
            assert!(!validation.is_valid);
            assert!(validation.message().contains("decision-9"));
        }
        _ => panic!("expected InvalidTree"),
    }
}

#[tokio::test]
async fn cyclic_tree_fails_to_start() {
    let bus = Arc::new(InMemoryEventBus::new());
    let mut definition = definition();
    definition.decision_points[1].options[0].next_decision_id = Some("decision-1".into());

    let result = TrainingSession::start(definition, user(), bus).await;

    match result {
        Err(TrainingError::InvalidTree(validation)) => {
            assert!(validation.message().contains("Circular reference"));
        }
        _ => panic!("expected InvalidTree"),
    }
}

#[tokio::test]
async fn unknown_option_is_rejected_and_changes_nothing() {
    let (mut session, _) = start().await;
    session.make_decision("wait").await.unwrap();
    let before = session.progress().clone();

    let err = session.make_decision("nonexistent").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::OptionNotFound);
    assert_eq!(session.progress(), &before);
    assert_eq!(session.progress().total_score(), -5);
    assert!(!session.progress().is_completed());
    assert_eq!(
        session.current_decision().map(|p| p.id().as_str()),
        Some("decision-2")
    );
}

#[tokio::test]
async fn current_decision_is_idempotent() {
    let (session, _) = start().await;

    let first = session.current_decision().cloned();
    let second = session.current_decision().cloned();

    assert_eq!(first, second);
}

#[tokio::test]
async fn end_time_is_fixed_at_completion() {
    let (mut session, _) = start().await;
    session.make_decision("escalate").await.unwrap();
    assert!(session.progress().end_time().is_none());

    session.make_decision("preserve").await.unwrap();
    let end_time = session.progress().end_time();
    assert!(end_time.is_some());

    let err = session.make_decision("preserve").await.unwrap_err();
    assert!(matches!(err, TrainingError::SessionCompleted));
    assert_eq!(session.progress().end_time(), end_time);
}

#[tokio::test]
async fn best_path_score_never_exceeds_max_score() {
    let (session, _) = start().await;
    let metrics = session.performance_metrics();

    let best = metrics.best_path_score.unwrap();
    assert!(best <= metrics.max_score);
    assert_eq!(best, 25);
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn failing_and_panicking_subscribers_do_not_block_others() {
    let bus = Arc::new(InMemoryEventBus::new());
    let delivered = Arc::new(AtomicUsize::new(0));
    bus.subscribe_all(ALL_TRAINING_EVENTS, Arc::new(FailingHandler));
    bus.subscribe_all(ALL_TRAINING_EVENTS, Arc::new(PanickingHandler));
    bus.subscribe_all(ALL_TRAINING_EVENTS, Arc::new(CountingHandler(delivered.clone())));

    let mut session = TrainingSession::start(definition(), user(), bus.clone())
        .await
        .unwrap();
    session.make_decision("escalate").await.unwrap();
    let outcome = session.make_decision("preserve").await.unwrap();

    assert!(outcome.is_completed);
    // initialized + two decisions + completed
    assert_eq!(delivered.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn unsubscribed_handler_stops_receiving() {
    let bus = Arc::new(InMemoryEventBus::new());
    let delivered = Arc::new(AtomicUsize::new(0));
    bus.subscribe(DECISION_MADE, Arc::new(CountingHandler(delivered.clone())));

    let mut session = TrainingSession::start(definition(), user(), bus.clone())
        .await
        .unwrap();
    session.make_decision("escalate").await.unwrap();
    assert!(bus.unsubscribe(DECISION_MADE, "CountingHandler"));
    session.make_decision("preserve").await.unwrap();

    assert_eq!(delivered.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn progress_round_trips_through_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileProgressStore::new(temp_dir.path());

    let (mut session, _) = start().await;
    session.make_decision("wait").await.unwrap();
    session.save_progress(&store).await.unwrap();

    let (mut resumed, _) = start().await;
    assert!(resumed.load_progress(&store).await.unwrap());

    assert_eq!(resumed.progress(), session.progress());
    assert_eq!(
        resumed.current_decision().map(|p| p.id().as_str()),
        Some("decision-2")
    );
    let outcome = resumed.make_decision("preserve").await.unwrap();
    assert_eq!(outcome.progress.total_score(), 10);
}

#[tokio::test]
async fn load_without_snapshot_keeps_progress() {
    let store = InMemoryProgressStore::new();
    let (mut session, _) = start().await;
    session.make_decision("escalate").await.unwrap();

    assert!(!session.load_progress(&store).await.unwrap());
    assert_eq!(session.progress().decisions().len(), 1);
}

#[tokio::test]
async fn snapshots_are_only_written_on_request() {
    let store = InMemoryProgressStore::new();
    let (mut session, _) = start().await;
    session.make_decision("escalate").await.unwrap();
    session.make_decision("preserve").await.unwrap();

    let key = ProgressKey::for_progress(session.progress());
    assert!(!store.exists(&key).await.unwrap());

    session.save_progress(&store).await.unwrap();
    assert!(store.exists(&key).await.unwrap());
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn generated_recent_scenario_is_playable_end_to_end() {
    let scenario = ScenarioGenerator::new()
        .generate(&ScenarioOptions::default().with_time_span_days(2))
        .unwrap();
    assert_eq!(scenario.timeline.len(), 8);
    assert_eq!(scenario.characters.len(), 2);

    let bus = Arc::new(InMemoryEventBus::new());
    let mut session = TrainingSession::start(scenario.into_definition(), user(), bus)
        .await
        .unwrap();

    let plan = session.optimal_path();
    for step in &plan.steps {
        session.make_decision(step.option_id.as_str()).await.unwrap();
    }

    assert!(session.progress().is_completed());
    assert_eq!(session.progress().total_score(), 25);
    assert_eq!(session.performance_metrics().optimal_decisions, 2);

    let categories: Vec<String> = session
        .decision_path()
        .into_iter()
        .map(|entry| entry.category)
        .collect();
    assert_eq!(categories, vec!["Escalate", "Collect evidence"]);
}

#[tokio::test]
async fn generated_older_scenario_starts_at_evidence() {
    let scenario = ScenarioGenerator::new()
        .generate(&ScenarioOptions::default())
        .unwrap();

    let bus = Arc::new(InMemoryEventBus::new());
    let session = TrainingSession::start(scenario.into_definition(), user(), bus)
        .await
        .unwrap();

    assert_eq!(
        session.current_decision().map(|p| p.id().as_str()),
        Some("decision-2")
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn total_score_matches_decision_log(choices in proptest::collection::vec(0usize..4, 0..4)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let (mut session, _) = start().await;
            let candidates = ["escalate", "wait", "preserve", "nonexistent"];

            for index in choices {
                let _ = session.make_decision(candidates[index]).await;
                let progress = session.progress();
                assert_eq!(progress.total_score(), progress.replayed_score());
                assert_eq!(progress.is_completed(), progress.end_time().is_some());
            }
        });
    }
}
