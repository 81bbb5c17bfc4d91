//! Analysis module - Pure derived data over a tree and a progress.
//!
//! Nothing here mutates state; every function can be called at any point of
//! a traversal.
//!
//! - `metrics` - counts, rates, timings and score ratios
//! - `path` - the trainee's path and the greedy optimal path
//! - `coaching` - improvement suggestions comparing the two

mod coaching;
mod metrics;
mod path;

pub use coaching::{improvement_suggestions, ImprovementSuggestion, DEVELOPING_RATE, EXCELLENT_RATE};
pub use metrics::{decision_durations, PerformanceMetrics};
pub use path::{calculate_optimal_path, decision_path, DecisionPathEntry, OptimalPath, OptimalStep};
