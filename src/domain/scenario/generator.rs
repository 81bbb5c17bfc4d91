//! Scenario generation.
//!
//! Generation is selection: the case type picks the authored content and the
//! time span picks where in the tree the trainee joins the case.

use uuid::Uuid;

use super::content::{
    EVIDENCE_DECISION, FINANCIAL_CHARACTERS, FINANCIAL_SUMMARY, FINANCIAL_TIMELINE, FINANCIAL_TITLE,
    FINANCIAL_TREE, FINANCIAL_TREE_ID, GOLDEN_HOUR_DECISION,
};
use super::model::{Scenario, TimelineEvent};
use super::options::{CaseType, ScenarioOptions};
use crate::domain::decision::DecisionError;
use crate::domain::foundation::{DecisionId, Timestamp};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioGenerator;

impl ScenarioGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, options: &ScenarioOptions) -> Result<Scenario, DecisionError> {
        self.generate_at(options, Timestamp::now())
    }

    /// Generates a scenario with timeline dates relative to `now`.
    pub fn generate_at(
        &self,
        options: &ScenarioOptions,
        now: Timestamp,
    ) -> Result<Scenario, DecisionError> {
        match options.case_type {
            CaseType::Financial => self.financial(options, now),
            // No dedicated content yet; these reuse the financial case.
            CaseType::IdentityTheft | CaseType::CyberStalking => self.financial(options, now),
        }
    }

    fn financial(&self, options: &ScenarioOptions, now: Timestamp) -> Result<Scenario, DecisionError> {
        let root = if options.is_recent_incident() {
            GOLDEN_HOUR_DECISION
        } else {
            EVIDENCE_DECISION
        };
        let tree = FINANCIAL_TREE
            .subtree(root, format!("{}-{}", FINANCIAL_TREE_ID, root), FINANCIAL_TITLE)
            .ok_or_else(|| DecisionError::DecisionNotFound(DecisionId::new(root)))?;

        let out_of_range = || DecisionError::TimeSpanOutOfRange {
            days: options.time_span_days,
        };
        let span_start = now
            .minus_days(i64::from(options.time_span_days))
            .ok_or_else(out_of_range)?;
        let timeline = FINANCIAL_TIMELINE
            .iter()
            .map(|(offset, event)| {
                Ok(TimelineEvent {
                    date: span_start.plus_days(*offset).ok_or_else(out_of_range)?,
                    event: (*event).to_string(),
                })
            })
            .collect::<Result<Vec<_>, DecisionError>>()?;

        tracing::debug!(
            case_type = %options.case_type,
            complexity = %options.complexity,
            time_span_days = options.time_span_days,
            start_decision = root,
            "Generated scenario"
        );

        Ok(Scenario {
            id: Uuid::new_v4(),
            title: format!("{}: {}", options.case_type.label(), FINANCIAL_TITLE),
            case_type: options.case_type,
            complexity: options.complexity,
            summary: FINANCIAL_SUMMARY.to_string(),
            characters: FINANCIAL_CHARACTERS.clone(),
            timeline,
            decision_tree: tree,
            generated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(scenario: &Scenario) -> Vec<&str> {
        scenario
            .decision_tree
            .decision_points()
            .iter()
            .map(|p| p.id().as_str())
            .collect()
    }

    #[test]
    fn recent_incident_starts_at_golden_hour_with_both_nodes() {
        let options = ScenarioOptions::default().with_time_span_days(3);
        let scenario = ScenarioGenerator::new().generate(&options).unwrap();

        assert_eq!(ids(&scenario), vec!["decision-1", "decision-2"]);
        assert_eq!(
            scenario.decision_tree.start_decision_id().map(|d| d.as_str()),
            Some("decision-1")
        );
        assert!(scenario.decision_tree.validate().is_valid);
    }

    #[test]
    fn older_incident_starts_at_evidence_only() {
        let scenario = ScenarioGenerator::new()
            .generate(&ScenarioOptions::default())
            .unwrap();

        assert_eq!(ids(&scenario), vec!["decision-2"]);
        assert_eq!(scenario.decision_tree.max_score(), 15);
        assert!(scenario.decision_tree.validate().is_valid);
    }

    #[test]
    fn timeline_is_offset_from_span_start() {
        let now = Timestamp::now();
        let options = ScenarioOptions::default().with_time_span_days(10);
        let scenario = ScenarioGenerator::new().generate_at(&options, now).unwrap();

        assert_eq!(scenario.timeline.len(), 8);
        let span_start = now.minus_days(10).unwrap();
        assert_eq!(scenario.timeline[0].date, span_start);
        assert_eq!(scenario.timeline[7].date, span_start.plus_days(6).unwrap());
        assert_eq!(scenario.generated_at, now);
    }

    #[test]
    fn other_case_types_reuse_financial_content() {
        let generator = ScenarioGenerator::new();
        let now = Timestamp::now();
        let financial = generator.generate_at(&ScenarioOptions::default(), now).unwrap();

        for case_type in [CaseType::IdentityTheft, CaseType::CyberStalking] {
            let options = ScenarioOptions::default().with_case_type(case_type);
            let scenario = generator.generate_at(&options, now).unwrap();
            assert_eq!(scenario.case_type, case_type);
            assert_eq!(scenario.summary, financial.summary);
            assert_eq!(scenario.decision_tree, financial.decision_tree);
        }
    }

    #[test]
    fn unrepresentable_time_span_is_an_error() {
        let options = ScenarioOptions::default().with_time_span_days(u32::MAX);
        let result = ScenarioGenerator::new().generate(&options);

        assert_eq!(
            result.unwrap_err(),
            DecisionError::TimeSpanOutOfRange { days: u32::MAX }
        );
    }

    #[test]
    fn scenario_converts_to_playable_definition() {
        let options = ScenarioOptions::default().with_time_span_days(1);
        let scenario = ScenarioGenerator::new().generate(&options).unwrap();
        let definition = scenario.into_definition();

        assert_eq!(definition.decision_points.len(), 2);
        assert_eq!(definition.start_decision_id.as_ref().map(|d| d.as_str()), Some("decision-1"));
    }
}
