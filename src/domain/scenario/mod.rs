//! Scenario module - Case narratives wrapped around authored decision trees.

mod content;
mod generator;
mod model;
mod options;

pub use content::{EVIDENCE_DECISION, FINANCIAL_TREE, FINANCIAL_TREE_ID, GOLDEN_HOUR_DECISION};
pub use generator::ScenarioGenerator;
pub use model::{Character, CharacterRole, Scenario, TimelineEvent};
pub use options::{
    CaseType, Complexity, ScenarioOptions, DEFAULT_DECISION_POINTS, DEFAULT_TIME_SPAN_DAYS,
    MAX_TIME_SPAN_DAYS, RECENT_INCIDENT_DAYS,
};
