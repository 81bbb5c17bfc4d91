//! Generated scenario shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::{CaseType, Complexity};
use crate::domain::decision::{DecisionTree, TreeDefinition};
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterRole {
    Victim,
    Suspect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub role: CharacterRole,
    pub description: String,
}

impl Character {
    pub fn new(name: impl Into<String>, role: CharacterRole, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: Timestamp,
    pub event: String,
}

/// A case narrative with its playable decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: Uuid,
    pub title: String,
    pub case_type: CaseType,
    pub complexity: Complexity,
    pub summary: String,
    pub characters: Vec<Character>,
    pub timeline: Vec<TimelineEvent>,
    pub decision_tree: DecisionTree,
    pub generated_at: Timestamp,
}

impl Scenario {
    pub fn victim(&self) -> Option<&Character> {
        self.characters.iter().find(|c| c.role == CharacterRole::Victim)
    }

    /// The tree in authoring shape, ready to start a training session.
    pub fn into_definition(self) -> TreeDefinition {
        TreeDefinition::from(&self.decision_tree)
    }
}
