//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `decision` - Decision options, points, trees and traversal progress
//! - `analysis` - Pure domain services for scoring, paths and coaching
//! - `scenario` - Case narratives built around authored decision trees

pub mod analysis;
pub mod decision;
pub mod foundation;
pub mod scenario;
