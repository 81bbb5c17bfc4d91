//! Performance metrics over a traversal.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{DecisionTree, DecisionTreeProgress};
use crate::domain::foundation::{Percentage, Timestamp};

/// Summary figures for one progress against its tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_decisions: usize,
    pub optimal_decisions: usize,
    pub optimal_rate: Percentage,
    pub total_score: i64,
    pub min_score: i64,
    /// Per-node maxima sum (over-estimates branching trees).
    pub max_score: i64,
    /// Exact best achievable score, when the tree is acyclic.
    pub best_path_score: Option<i64>,
    /// Score relative to `best_path_score`, falling back to `max_score`.
    pub score_percentage: Percentage,
    pub average_decision_secs: f64,
    pub total_duration_secs: i64,
    /// Decisions that took longer than their node's advisory time limit.
    pub time_limit_exceeded: usize,
    pub is_completed: bool,
}

impl PerformanceMetrics {
    pub fn calculate(tree: &DecisionTree, progress: &DecisionTreeProgress) -> Self {
        Self::calculate_at(tree, progress, Timestamp::now())
    }

    /// Computes metrics, measuring an unfinished traversal up to `now`.
    pub fn calculate_at(
        tree: &DecisionTree,
        progress: &DecisionTreeProgress,
        now: Timestamp,
    ) -> Self {
        let decisions = progress.decisions();
        let total_decisions = decisions.len();
        let optimal_decisions = decisions.iter().filter(|d| d.is_optimal).count();

        let elapsed = decision_durations(progress);
        let average_decision_secs = if elapsed.is_empty() {
            0.0
        } else {
            elapsed.iter().sum::<i64>() as f64 / elapsed.len() as f64
        };

        let time_limit_exceeded = decisions
            .iter()
            .zip(elapsed.iter())
            .filter(|(record, secs)| {
                tree.get_decision_point(record.decision_id.as_str())
                    .and_then(|p| p.time_limit_secs())
                    .is_some_and(|limit| **secs > i64::from(limit))
            })
            .count();

        let end = progress.end_time().unwrap_or(now);
        let best_path_score = tree.calculate_best_path_score();
        let reference = best_path_score.unwrap_or(tree.max_score());

        Self {
            total_decisions,
            optimal_decisions,
            optimal_rate: Percentage::from_ratio(optimal_decisions as i64, total_decisions as i64),
            total_score: progress.total_score(),
            min_score: tree.min_score(),
            max_score: tree.max_score(),
            best_path_score,
            score_percentage: Percentage::from_ratio(progress.total_score(), reference),
            average_decision_secs,
            total_duration_secs: end.duration_since(&progress.start_time()).num_seconds(),
            time_limit_exceeded,
            is_completed: progress.is_completed(),
        }
    }
}

/// Seconds spent on each logged decision, measured from the previous decision
/// (or the session start for the first one).
pub fn decision_durations(progress: &DecisionTreeProgress) -> Vec<i64> {
    let mut previous = progress.start_time();
    progress
        .decisions()
        .iter()
        .map(|record| {
            let secs = record.timestamp.duration_since(&previous).num_seconds();
            previous = record.timestamp;
            secs
        })
        .collect()
}
