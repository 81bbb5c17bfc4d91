//! Decision paths: what the trainee chose, and what a greedy expert would choose.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::metrics::decision_durations;
use crate::domain::decision::{DecisionTree, DecisionTreeProgress, OptionCategory};
use crate::domain::foundation::{DecisionId, OptionId};

/// One step the trainee actually took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPathEntry {
    pub decision_id: DecisionId,
    pub decision_title: String,
    pub option_id: OptionId,
    pub option_text: String,
    /// Label of the option's procedural category.
    pub category: String,
    pub points: i32,
    pub is_optimal: bool,
    pub elapsed_secs: i64,
}

/// One step of the greedy best path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalStep {
    pub decision_id: DecisionId,
    pub decision_title: String,
    pub option_id: OptionId,
    pub option_text: String,
    pub points: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalPath {
    pub steps: Vec<OptimalStep>,
    pub total_points: i64,
}

/// The trainee's choices joined with the tree's titles and texts.
///
/// Records whose decision or option no longer resolve keep their ids and
/// fall back to the id for the display text.
pub fn decision_path(tree: &DecisionTree, progress: &DecisionTreeProgress) -> Vec<DecisionPathEntry> {
    progress
        .decisions()
        .iter()
        .zip(decision_durations(progress))
        .map(|(record, elapsed_secs)| {
            let point = tree.get_decision_point(record.decision_id.as_str());
            let option = point.and_then(|p| p.find_option(record.option_id.as_str()));
            DecisionPathEntry {
                decision_id: record.decision_id.clone(),
                decision_title: point
                    .map(|p| p.title().to_string())
                    .unwrap_or_else(|| record.decision_id.to_string()),
                option_id: record.option_id.clone(),
                option_text: option
                    .map(|o| o.text().to_string())
                    .unwrap_or_else(|| record.option_id.to_string()),
                category: option
                    .map_or(OptionCategory::Other, |o| o.category())
                    .label()
                    .to_string(),
                points: record.points,
                is_optimal: record.is_optimal,
                elapsed_secs,
            }
        })
        .collect()
}

/// Walks from the start taking each node's greedy best option.
///
/// Stops at a terminal option, an unresolvable node, a node without
/// options, or a node already on the path.
pub fn calculate_optimal_path(tree: &DecisionTree) -> OptimalPath {
    let mut path = OptimalPath::default();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = tree.start_decision();

    while let Some(point) = current {
        if !visited.insert(point.id().as_str()) {
            break;
        }
        let Some(option) = point.optimal_option() else {
            break;
        };

        path.total_points += i64::from(option.points());
        path.steps.push(OptimalStep {
            decision_id: point.id().clone(),
            decision_title: point.title().to_string(),
            option_id: option.id().clone(),
            option_text: option.text().to_string(),
            points: option.points(),
        });

        current = option
            .next_decision_id()
            .and_then(|next| tree.get_decision_point(next.as_str()));
    }

    path
}
