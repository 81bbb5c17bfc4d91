//! Improvement suggestions: where the trainee's choices diverged from the
//! greedy best option at each visited node.

use serde::{Deserialize, Serialize};

use super::metrics::PerformanceMetrics;
use crate::domain::decision::{DecisionTree, DecisionTreeProgress};
use crate::domain::foundation::{DecisionId, OptionId};

/// Optimal rate at or above which the summary is congratulatory.
pub const EXCELLENT_RATE: u8 = 80;

/// Optimal rate at or above which the summary is encouraging.
pub const DEVELOPING_RATE: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementSuggestion {
    /// None for the closing summary line.
    pub decision_id: Option<DecisionId>,
    pub chosen_option_id: Option<OptionId>,
    pub suggested_option_id: Option<OptionId>,
    /// Points the suggested option would have added over the chosen one.
    pub point_difference: i64,
    pub message: String,
}

impl ImprovementSuggestion {
    fn summary(message: impl Into<String>) -> Self {
        Self {
            decision_id: None,
            chosen_option_id: None,
            suggested_option_id: None,
            point_difference: 0,
            message: message.into(),
        }
    }
}

/// Per-decision suggestions followed by one summary line.
pub fn improvement_suggestions(
    tree: &DecisionTree,
    progress: &DecisionTreeProgress,
) -> Vec<ImprovementSuggestion> {
    let mut suggestions = Vec::new();

    for record in progress.decisions() {
        let Some(point) = tree.get_decision_point(record.decision_id.as_str()) else {
            continue;
        };
        let Some(best) = point.optimal_option() else {
            continue;
        };
        if best.id() == &record.option_id {
            continue;
        }

        let chosen_text = point
            .find_option(record.option_id.as_str())
            .map(|o| o.text().to_string())
            .unwrap_or_else(|| record.option_id.to_string());
        let difference = i64::from(best.points()) - i64::from(record.points);

        suggestions.push(ImprovementSuggestion {
            decision_id: Some(point.id().clone()),
            chosen_option_id: Some(record.option_id.clone()),
            suggested_option_id: Some(best.id().clone()),
            point_difference: difference,
            message: format!(
                "At '{}', consider '{}' instead of '{}' ({:+} points).",
                point.title(),
                best.text(),
                chosen_text,
                difference
            ),
        });
    }

    suggestions.push(summary_for(tree, progress));
    suggestions
}

fn summary_for(tree: &DecisionTree, progress: &DecisionTreeProgress) -> ImprovementSuggestion {
    if progress.decisions().is_empty() {
        return ImprovementSuggestion::summary("Make at least one decision to receive coaching.");
    }

    let rate = PerformanceMetrics::calculate(tree, progress).optimal_rate;
    let message = if rate.value() >= EXCELLENT_RATE {
        format!(
            "Excellent judgement: {} of your decisions matched the recommended procedure.",
            rate
        )
    } else if rate.value() >= DEVELOPING_RATE {
        format!(
            "Good progress: {} of your decisions were optimal. Review the points above to close the gaps.",
            rate
        )
    } else {
        format!(
            "Only {} of your decisions were optimal. Revisit the standard operating procedure for this case type and try again.",
            rate
        )
    };
    ImprovementSuggestion::summary(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{DecisionOption, DecisionPoint};
    use crate::domain::foundation::{Timestamp, TreeId, UserId};

    fn tree() -> DecisionTree {
        DecisionTree::new(
            "t",
            "T",
            vec![
                DecisionPoint::new("decision-1", "Golden hour", "S")
                    .with_option(
                        DecisionOption::new("escalate", "Call 1930", 10)
                            .leads_to("decision-2")
                            .optimal(),
                    )
                    .with_option(DecisionOption::new("wait", "Wait for the bank", -5).leads_to("decision-2")),
                DecisionPoint::new("decision-2", "Evidence", "S")
                    .with_option(DecisionOption::new("preserve", "Preserve logs", 15).optimal())
                    .with_option(DecisionOption::new("screenshots", "Screenshots only", 0)),
            ],
            None,
        )
    }

    fn play(choices: &[(&str, &str)]) -> (DecisionTree, DecisionTreeProgress) {
        let tree = tree();
        let mut progress = DecisionTreeProgress::new(
            UserId::new("u").unwrap(),
            TreeId::new("t"),
            tree.start_decision_id().cloned(),
        );
        for (decision, option) in choices {
            let eval = tree
                .get_decision_point(decision)
                .unwrap()
                .evaluate_decision(option)
                .unwrap();
            progress.record_decision(DecisionId::new(*decision), &eval, Timestamp::now());
        }
        (tree, progress)
    }

    #[test]
    fn perfect_run_only_gets_summary() {
        let (tree, progress) = play(&[("decision-1", "escalate"), ("decision-2", "preserve")]);
        let suggestions = improvement_suggestions(&tree, &progress);

        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].decision_id.is_none());
        assert!(suggestions[0].message.starts_with("Excellent judgement: 100%"));
    }

    #[test]
    fn divergent_choice_names_better_option() {
        let (tree, progress) = play(&[("decision-1", "wait"), ("decision-2", "preserve")]);
        let suggestions = improvement_suggestions(&tree, &progress);

        assert_eq!(suggestions.len(), 2);
        let first = &suggestions[0];
        assert_eq!(first.decision_id, Some(DecisionId::new("decision-1")));
        assert_eq!(first.suggested_option_id, Some(OptionId::new("escalate")));
        assert_eq!(first.point_difference, 15);
        assert_eq!(
            first.message,
            "At 'Golden hour', consider 'Call 1930' instead of 'Wait for the bank' (+15 points)."
        );
        assert!(suggestions[1].message.starts_with("Good progress: 50%"));
    }

    #[test]
    fn poor_run_gets_procedure_reminder() {
        let (tree, progress) = play(&[("decision-1", "wait"), ("decision-2", "screenshots")]);
        let suggestions = improvement_suggestions(&tree, &progress);

        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[2].message.starts_with("Only 0%"));
    }

    #[test]
    fn no_decisions_yields_prompt() {
        let (tree, progress) = play(&[]);
        let suggestions = improvement_suggestions(&tree, &progress);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].message, "Make at least one decision to receive coaching.");
    }
}
