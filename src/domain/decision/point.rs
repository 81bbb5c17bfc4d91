//! Decision points: the nodes of a decision tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::errors::DecisionError;
use super::option::{Consequence, DecisionOption};
use crate::domain::foundation::{DecisionId, OptionId};

/// Result of evaluating one option at a decision point.
///
/// Every field is copied from the matched option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub points: i32,
    pub feedback: String,
    pub next_decision_id: Option<DecisionId>,
    pub consequences: Vec<Consequence>,
    pub is_optimal: bool,
    pub option: DecisionOption,
}

impl Evaluation {
    fn of(option: &DecisionOption) -> Self {
        Self {
            points: option.points(),
            feedback: option.feedback().to_string(),
            next_decision_id: option.next_decision_id().cloned(),
            consequences: option.consequences().to_vec(),
            is_optimal: option.is_optimal(),
            option: option.clone(),
        }
    }
}

/// A node in the decision graph: a situation plus the choices offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPoint {
    id: DecisionId,
    title: String,
    description: Option<String>,
    context: Option<String>,
    scenario: String,
    time_limit_secs: Option<u32>,
    options: Vec<DecisionOption>,
    metadata: Map<String, JsonValue>,
}

impl DecisionPoint {
    pub fn new(
        id: impl Into<DecisionId>,
        title: impl Into<String>,
        scenario: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            context: None,
            scenario: scenario.into(),
            time_limit_secs: None,
            options: Vec::new(),
            metadata: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    pub fn with_option(mut self, option: DecisionOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_options(mut self, options: Vec<DecisionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, JsonValue>) -> Self {
        self.metadata = metadata;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DecisionId {
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

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Advisory limit only; nothing enforces it.
    pub fn time_limit_secs(&self) -> Option<u32> {
        self.time_limit_secs
    }

    /// Options in display order.
    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    pub fn metadata(&self) -> &Map<String, JsonValue> {
        &self.metadata
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn find_option(&self, option_id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id() == option_id)
    }

    /// Evaluates the option with the given id.
    ///
    /// # Errors
    ///
    /// - `OptionNotFound` if no option at this point has the id
    pub fn evaluate_decision(&self, option_id: &str) -> Result<Evaluation, DecisionError> {
        self.find_option(option_id)
            .map(Evaluation::of)
            .ok_or_else(|| DecisionError::OptionNotFound {
                decision_id: self.id.clone(),
                option_id: OptionId::new(option_id),
            })
    }

    /// The option a greedy expert would pick here.
    ///
    /// An option flagged optimal wins; otherwise the highest-scoring option,
    /// with ties going to the earlier one.
    pub fn optimal_option(&self) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.is_optimal()).or_else(|| {
            self.options
                .iter()
                .fold(None, |best: Option<&DecisionOption>, o| match best {
                    Some(b) if b.points() >= o.points() => Some(b),
                    _ => Some(o),
                })
        })
    }

    /// Highest point value offered here, or None when there are no options.
    pub fn max_points(&self) -> Option<i32> {
        self.options.iter().map(DecisionOption::points).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::option::{ConsequenceType, Impact};

    fn golden_hour() -> DecisionPoint {
        DecisionPoint::new("decision-1", "Golden hour", "Money left the account 40 minutes ago.")
            .with_time_limit(120)
            .with_option(
                DecisionOption::new("escalate", "Call the helpline", 10)
                    .with_feedback("Fast escalation keeps the funds recoverable.")
                    .with_consequence(Consequence::new(
                        ConsequenceType::Positive,
                        "Beneficiary account frozen",
                        Impact::High,
                    ))
                    .leads_to("decision-2")
                    .optimal(),
            )
            .with_option(
                DecisionOption::new("wait", "Wait for the bank", -5)
                    .with_feedback("The money is gone by morning.")
                    .leads_to("decision-2"),
            )
    }

    #[test]
    fn evaluate_copies_option_fields() {
        let point = golden_hour();
        let eval = point.evaluate_decision("escalate").unwrap();

        assert_eq!(eval.points, 10);
        assert_eq!(eval.feedback, "Fast escalation keeps the funds recoverable.");
        assert_eq!(eval.next_decision_id, Some(DecisionId::new("decision-2")));
        assert_eq!(eval.consequences.len(), 1);
        assert!(eval.is_optimal);
        assert_eq!(eval.option.id(), "escalate");
    }

    #[test]
    fn evaluate_unknown_option_is_rejected() {
        let point = golden_hour();
        let err = point.evaluate_decision("nonexistent").unwrap_err();

        assert_eq!(
            err,
            DecisionError::OptionNotFound {
                decision_id: DecisionId::new("decision-1"),
                option_id: OptionId::new("nonexistent"),
            }
        );
    }

    #[test]
    fn evaluate_on_point_without_options_is_rejected() {
        let point = DecisionPoint::new("empty", "Empty", "Nothing to choose");
        assert!(point.evaluate_decision("anything").is_err());
        assert!(point.optimal_option().is_none());
        assert_eq!(point.max_points(), None);
    }

    #[test]
    fn optimal_option_prefers_flag_over_points() {
        let point = DecisionPoint::new("p", "P", "S")
            .with_option(DecisionOption::new("big", "Big", 50))
            .with_option(DecisionOption::new("flagged", "Flagged", 5).optimal());

        assert_eq!(point.optimal_option().unwrap().id(), "flagged");
    }

    #[test]
    fn optimal_option_falls_back_to_highest_points_first_on_tie() {
        let point = DecisionPoint::new("p", "P", "S")
            .with_option(DecisionOption::new("a", "A", 3))
            .with_option(DecisionOption::new("b", "B", 7))
            .with_option(DecisionOption::new("c", "C", 7));

        assert_eq!(point.optimal_option().unwrap().id(), "b");
        assert_eq!(point.max_points(), Some(7));
    }
}
