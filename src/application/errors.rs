//! Training session errors.

use thiserror::Error;

use crate::domain::decision::{DecisionError, TreeValidation};
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::ProgressStoreError;

#[derive(Debug, Error)]
pub enum TrainingError {
    /// The tree failed structural validation; no progress was created.
    #[error("Invalid decision tree: {}", .0.message())]
    InvalidTree(TreeValidation),

    #[error("Invalid tree definition: {0}")]
    InvalidDefinition(#[from] ValidationError),

    /// The progress cursor does not resolve to a decision point.
    #[error("No active decision")]
    NoActiveDecision,

    #[error("Training session already completed")]
    SessionCompleted,

    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error(transparent)]
    Storage(#[from] ProgressStoreError),
}

impl TrainingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TrainingError::InvalidTree(_) => ErrorCode::InvalidTree,
            TrainingError::InvalidDefinition(_) => ErrorCode::ValidationFailed,
            TrainingError::NoActiveDecision => ErrorCode::NoActiveDecision,
            TrainingError::SessionCompleted => ErrorCode::SessionCompleted,
            TrainingError::Decision(e) => e.code(),
            TrainingError::Storage(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::TreeValidationIssue;
    use crate::domain::foundation::{DecisionId, OptionId};

    #[test]
    fn invalid_tree_message_joins_issues() {
        let validation = TreeValidation {
            is_valid: false,
            errors: vec![
                TreeValidationIssue::StartDecisionNotFound {
                    decision_id: DecisionId::new("missing"),
                },
                TreeValidationIssue::CircularReference {
                    decision_id: DecisionId::new("a"),
                },
            ],
        };
        let err = TrainingError::InvalidTree(validation);

        assert_eq!(
            err.to_string(),
            "Invalid decision tree: Start decision 'missing' not found; Circular reference detected at decision 'a'"
        );
        assert_eq!(err.code(), ErrorCode::InvalidTree);
    }

    #[test]
    fn decision_errors_keep_their_code() {
        let err: TrainingError = DecisionError::OptionNotFound {
            decision_id: DecisionId::new("d"),
            option_id: OptionId::new("o"),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::OptionNotFound);
    }
}
