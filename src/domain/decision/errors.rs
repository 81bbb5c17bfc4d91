//! Decision model errors.

use thiserror::Error;

use crate::domain::foundation::{DecisionId, ErrorCode, OptionId};

/// Errors raised while evaluating decisions against the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// The submitted option id does not exist at the decision point.
    #[error("Option '{option_id}' does not exist at decision '{decision_id}'")]
    OptionNotFound {
        decision_id: DecisionId,
        option_id: OptionId,
    },

    /// The decision id does not resolve to a node of the tree.
    #[error("Decision '{0}' not found in tree")]
    DecisionNotFound(DecisionId),

    /// A scenario timeline would fall outside the supported date range.
    #[error("Time span of {days} days is out of range")]
    TimeSpanOutOfRange { days: u32 },
}

impl DecisionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::OptionNotFound { .. } => ErrorCode::OptionNotFound,
            DecisionError::DecisionNotFound(_) => ErrorCode::DecisionNotFound,
            DecisionError::TimeSpanOutOfRange { .. } => ErrorCode::ValidationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_not_found_names_both_ids() {
        let err = DecisionError::OptionNotFound {
            decision_id: DecisionId::new("decision-1"),
            option_id: OptionId::new("nonexistent"),
        };
        assert_eq!(
            err.to_string(),
            "Option 'nonexistent' does not exist at decision 'decision-1'"
        );
        assert_eq!(err.code(), ErrorCode::OptionNotFound);
    }
}
