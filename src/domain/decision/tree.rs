//! Decision tree: an immutable graph of decision points.
//!
//! # Invariants (checked by [`DecisionTree::validate`], not at construction)
//!
//! - the start decision resolves to a node
//! - every option's next decision resolves to a node or is absent
//! - no directed cycle is reachable from the start node

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::point::DecisionPoint;
use crate::domain::foundation::{DecisionId, OptionId, TreeId};

/// One structural problem found by [`DecisionTree::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeValidationIssue {
    #[error("Decision tree has no decision points")]
    EmptyTree,

    #[error("Decision point at position {index} has a blank id")]
    BlankDecisionId { index: usize },

    #[error("Duplicate decision id '{decision_id}'")]
    DuplicateDecisionId { decision_id: DecisionId },

    #[error("Duplicate option id '{option_id}' in decision '{decision_id}'")]
    DuplicateOptionId {
        decision_id: DecisionId,
        option_id: OptionId,
    },

    #[error("Start decision '{decision_id}' not found")]
    StartDecisionNotFound { decision_id: DecisionId },

    #[error("Option '{option_id}' in decision '{decision_id}' references non-existent decision '{target}'")]
    DanglingReference {
        decision_id: DecisionId,
        option_id: OptionId,
        target: DecisionId,
    },

    #[error("Circular reference detected at decision '{decision_id}'")]
    CircularReference { decision_id: DecisionId },
}

/// Outcome of validating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeValidation {
    pub is_valid: bool,
    pub errors: Vec<TreeValidationIssue>,
}

impl TreeValidation {
    fn from_issues(errors: Vec<TreeValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// All error messages joined with "; ".
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A named graph of decision points with a start pointer and score bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTree {
    id: TreeId,
    title: String,
    description: Option<String>,
    context: Option<String>,
    decision_points: Vec<DecisionPoint>,
    start_decision_id: Option<DecisionId>,
    min_score: i64,
    max_score: i64,
}

impl DecisionTree {
    /// Creates a tree. When `start_decision_id` is None the first point is the start.
    pub fn new(
        id: impl Into<TreeId>,
        title: impl Into<String>,
        decision_points: Vec<DecisionPoint>,
        start_decision_id: Option<DecisionId>,
    ) -> Self {
        let start_decision_id =
            start_decision_id.or_else(|| decision_points.first().map(|p| p.id().clone()));
        let mut tree = Self {
            id: id.into(),
            title: title.into(),
            description: None,
            context: None,
            decision_points,
            start_decision_id,
            min_score: 0,
            max_score: 0,
        };
        tree.max_score = tree.calculate_max_score();
        tree
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_min_score(mut self, min_score: i64) -> Self {
        self.min_score = min_score;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TreeId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn decision_points(&self) -> &[DecisionPoint] {
        &self.decision_points
    }

    pub fn start_decision_id(&self) -> Option<&DecisionId> {
        self.start_decision_id.as_ref()
    }

    pub fn min_score(&self) -> i64 {
        self.min_score
    }

    /// Per-node maxima sum, fixed at construction. See [`Self::calculate_max_score`].
    pub fn max_score(&self) -> i64 {
        self.max_score
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn get_decision_point(&self, id: &str) -> Option<&DecisionPoint> {
        self.decision_points.iter().find(|p| p.id() == id)
    }

    pub fn start_decision(&self) -> Option<&DecisionPoint> {
        self.start_decision_id
            .as_ref()
            .and_then(|id| self.get_decision_point(id.as_str()))
    }

    /// Sums the best option value of every node in the tree.
    ///
    /// This ignores reachability: in a branching tree some nodes are skipped
    /// depending on earlier choices, so the result over-estimates the best
    /// achievable score. Use [`Self::calculate_best_path_score`] for the exact
    /// figure.
    pub fn calculate_max_score(&self) -> i64 {
        self.decision_points
            .iter()
            .filter_map(DecisionPoint::max_points)
            .map(i64::from)
            .sum()
    }

    /// Highest point total over all start-to-terminal paths.
    ///
    /// Options pointing at unknown decisions count as terminal. Returns None
    /// when the start does not resolve or a cycle is reachable.
    pub fn calculate_best_path_score(&self) -> Option<i64> {
        let start = self.start_decision()?;
        let mut memo: HashMap<&str, i64> = HashMap::new();
        let mut on_path: HashSet<&str> = HashSet::new();
        self.best_from(start, &mut memo, &mut on_path)
    }

    fn best_from<'a>(
        &'a self,
        point: &'a DecisionPoint,
        memo: &mut HashMap<&'a str, i64>,
        on_path: &mut HashSet<&'a str>,
    ) -> Option<i64> {
        let id = point.id().as_str();
        if let Some(score) = memo.get(id) {
            return Some(*score);
        }
        if !on_path.insert(id) {
            return None;
        }

        let mut best: Option<i64> = None;
        for option in point.options() {
            let tail = match option
                .next_decision_id()
                .and_then(|next| self.get_decision_point(next.as_str()))
            {
                Some(next) => self.best_from(next, memo, on_path)?,
                None => 0,
            };
            let total = i64::from(option.points()) + tail;
            best = Some(best.map_or(total, |b| b.max(total)));
        }

        on_path.remove(id);
        let score = best.unwrap_or(0);
        memo.insert(id, score);
        Some(score)
    }

    /// Ids reachable from the start node, in depth-first discovery order.
    pub fn reachable_ids(&self) -> Vec<DecisionId> {
        match &self.start_decision_id {
            Some(start) => self.reachable_from(start.as_str()),
            None => Vec::new(),
        }
    }

    fn reachable_from(&self, root: &str) -> Vec<DecisionId> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<&str> = vec![root];

        while let Some(id) = stack.pop() {
            let Some(point) = self.get_decision_point(id) else {
                continue;
            };
            if !seen.insert(point.id().as_str()) {
                continue;
            }
            order.push(point.id().clone());
            for next in point.options().iter().rev().filter_map(|o| o.next_decision_id()) {
                stack.push(next.as_str());
            }
        }
        order
    }

    /// A new tree rooted at `root` containing every node reachable from it,
    /// in the original authoring order. None if `root` is not in this tree.
    pub fn subtree(
        &self,
        root: &str,
        id: impl Into<TreeId>,
        title: impl Into<String>,
    ) -> Option<DecisionTree> {
        let root_point = self.get_decision_point(root)?;
        let keep: HashSet<DecisionId> = self.reachable_from(root).into_iter().collect();
        let points = self
            .decision_points
            .iter()
            .filter(|p| keep.contains(p.id()))
            .cloned()
            .collect();

        let mut tree = DecisionTree::new(id, title, points, Some(root_point.id().clone()))
            .with_min_score(self.min_score);
        tree.description = self.description.clone();
        tree.context = self.context.clone();
        Some(tree)
    }

    /// Checks the structural invariants without changing the tree.
    pub fn validate(&self) -> TreeValidation {
        let mut errors = Vec::new();

        if self.decision_points.is_empty() {
            errors.push(TreeValidationIssue::EmptyTree);
            return TreeValidation::from_issues(errors);
        }

        let mut ids: HashSet<&str> = HashSet::new();
        for (index, point) in self.decision_points.iter().enumerate() {
            if point.id().is_blank() {
                errors.push(TreeValidationIssue::BlankDecisionId { index });
            }
            if !ids.insert(point.id().as_str()) {
                errors.push(TreeValidationIssue::DuplicateDecisionId {
                    decision_id: point.id().clone(),
                });
            }

            let mut option_ids: HashSet<&str> = HashSet::new();
            for option in point.options() {
                if !option_ids.insert(option.id().as_str()) {
                    errors.push(TreeValidationIssue::DuplicateOptionId {
                        decision_id: point.id().clone(),
                        option_id: option.id().clone(),
                    });
                }
            }
        }

        match &self.start_decision_id {
            Some(start) if !ids.contains(start.as_str()) => {
                errors.push(TreeValidationIssue::StartDecisionNotFound {
                    decision_id: start.clone(),
                });
            }
            _ => {}
        }

        for point in &self.decision_points {
            for option in point.options() {
                if let Some(target) = option.next_decision_id() {
                    if !ids.contains(target.as_str()) {
                        errors.push(TreeValidationIssue::DanglingReference {
                            decision_id: point.id().clone(),
                            option_id: option.id().clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        if let Some(start) = self.start_decision() {
            let mut visited: HashSet<&str> = HashSet::new();
            let mut on_path: HashSet<&str> = HashSet::new();
            let mut reported: HashSet<&str> = HashSet::new();
            self.detect_cycles(start, &mut visited, &mut on_path, &mut reported, &mut errors);
        }

        TreeValidation::from_issues(errors)
    }

    fn detect_cycles<'a>(
        &'a self,
        point: &'a DecisionPoint,
        visited: &mut HashSet<&'a str>,
        on_path: &mut HashSet<&'a str>,
        reported: &mut HashSet<&'a str>,
        errors: &mut Vec<TreeValidationIssue>,
    ) {
        let id = point.id().as_str();
        visited.insert(id);
        on_path.insert(id);

        for next in point.options().iter().filter_map(|o| o.next_decision_id()) {
            let Some(next_point) = self.get_decision_point(next.as_str()) else {
                continue;
            };
            let next_id = next_point.id().as_str();
            if on_path.contains(next_id) {
                if reported.insert(next_id) {
                    errors.push(TreeValidationIssue::CircularReference {
                        decision_id: next_point.id().clone(),
                    });
                }
            } else if !visited.contains(next_id) {
                self.detect_cycles(next_point, visited, on_path, reported, errors);
            }
        }

        on_path.remove(id);
    }
}
