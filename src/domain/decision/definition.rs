//! Authoring shape for decision trees.
//!
//! Content arrives as camelCase JSON or YAML with most fields optional;
//! [`DecisionTree::from_definition`] turns it into the immutable model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::option::{Consequence, DecisionOption, OptionCategory};
use super::point::DecisionPoint;
use super::tree::DecisionTree;
use crate::domain::foundation::{DecisionId, OptionId, TreeId, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDefinition {
    pub id: OptionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub points: i32,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub consequences: Vec<Consequence>,
    #[serde(default)]
    pub next_decision_id: Option<DecisionId>,
    #[serde(default)]
    pub is_optimal: bool,
    #[serde(default)]
    pub category: OptionCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDefinition {
    pub id: DecisionId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, JsonValue>,
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDefinition {
    pub id: TreeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub decision_points: Vec<PointDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_decision_id: Option<DecisionId>,
    #[serde(default)]
    pub min_score: i64,
}

impl TreeDefinition {
    /// Parses a JSON document.
    pub fn from_json(input: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(input)
            .map_err(|e| ValidationError::invalid_format("tree_definition", e.to_string()))
    }

    /// Parses a YAML document.
    pub fn from_yaml(input: &str) -> Result<Self, ValidationError> {
        serde_yaml::from_str(input)
            .map_err(|e| ValidationError::invalid_format("tree_definition", e.to_string()))
    }
}

impl From<OptionDefinition> for DecisionOption {
    fn from(def: OptionDefinition) -> Self {
        let mut option = DecisionOption::new(def.id, def.text, def.points)
            .with_feedback(def.feedback)
            .with_consequences(def.consequences)
            .with_next(def.next_decision_id)
            .with_optimal(def.is_optimal)
            .with_category(def.category);
        if let Some(description) = def.description {
            option = option.with_description(description);
        }
        option
    }
}

impl From<PointDefinition> for DecisionPoint {
    fn from(def: PointDefinition) -> Self {
        let mut point = DecisionPoint::new(def.id, def.title, def.scenario)
            .with_options(def.options.into_iter().map(DecisionOption::from).collect())
            .with_metadata(def.metadata);
        if let Some(description) = def.description {
            point = point.with_description(description);
        }
        if let Some(context) = def.context {
            point = point.with_context(context);
        }
        if let Some(limit) = def.time_limit {
            point = point.with_time_limit(limit);
        }
        point
    }
}

impl DecisionTree {
    /// Builds the model from authored content. Does not validate.
    pub fn from_definition(def: TreeDefinition) -> Self {
        let points = def.decision_points.into_iter().map(DecisionPoint::from).collect();
        let mut tree = DecisionTree::new(def.id, def.title, points, def.start_decision_id)
            .with_min_score(def.min_score);
        if let Some(description) = def.description {
            tree = tree.with_description(description);
        }
        if let Some(context) = def.context {
            tree = tree.with_context(context);
        }
        tree
    }
}

impl From<&DecisionOption> for OptionDefinition {
    fn from(option: &DecisionOption) -> Self {
        Self {
            id: option.id().clone(),
            text: option.text().to_string(),
            description: option.description().map(str::to_string),
            points: option.points(),
            feedback: option.feedback().to_string(),
            consequences: option.consequences().to_vec(),
            next_decision_id: option.next_decision_id().cloned(),
            is_optimal: option.is_optimal(),
            category: option.category(),
        }
    }
}

impl From<&DecisionPoint> for PointDefinition {
    fn from(point: &DecisionPoint) -> Self {
        Self {
            id: point.id().clone(),
            title: point.title().to_string(),
            description: point.description().map(str::to_string),
            context: point.context().map(str::to_string),
            scenario: point.scenario().to_string(),
            time_limit: point.time_limit_secs(),
            metadata: point.metadata().clone(),
            options: point.options().iter().map(OptionDefinition::from).collect(),
        }
    }
}

impl From<&DecisionTree> for TreeDefinition {
    fn from(tree: &DecisionTree) -> Self {
        Self {
            id: tree.id().clone(),
            title: tree.title().to_string(),
            description: tree.description().map(str::to_string),
            context: tree.context().map(str::to_string),
            decision_points: tree
                .decision_points()
                .iter()
                .map(PointDefinition::from)
                .collect(),
            start_decision_id: tree.start_decision_id().cloned(),
            min_score: tree.min_score(),
        }
    }
}
