//! Decision module - The decision-tree model.
//!
//! Options, points and trees are immutable once built; the progress is the
//! only mutable entity and is owned by a single training session.

mod definition;
mod errors;
mod events;
mod option;
mod point;
mod progress;
mod tree;

pub use definition::{OptionDefinition, PointDefinition, TreeDefinition};
pub use errors::DecisionError;
pub use events::{
    DecisionMade, TreeCompleted, TreeInitialized, TreeReset, ALL_TRAINING_EVENTS, DECISION_MADE,
    TREE_COMPLETED, TREE_INITIALIZED, TREE_RESET,
};
pub use option::{Consequence, ConsequenceType, DecisionOption, Impact, OptionCategory};
pub use point::{DecisionPoint, Evaluation};
pub use progress::{DecisionRecord, DecisionTreeProgress};
pub use tree::{DecisionTree, TreeValidation, TreeValidationIssue};
