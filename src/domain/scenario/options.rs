//! Scenario generation options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of cybercrime a scenario is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    #[default]
    Financial,
    IdentityTheft,
    CyberStalking,
}

impl CaseType {
    pub fn label(&self) -> &'static str {
        match self {
            CaseType::Financial => "Financial fraud",
            CaseType::IdentityTheft => "Identity theft",
            CaseType::CyberStalking => "Cyber stalking",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseType::Financial => "financial",
            CaseType::IdentityTheft => "identity_theft",
            CaseType::CyberStalking => "cyber_stalking",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complexity::Beginner => "beginner",
            Complexity::Intermediate => "intermediate",
            Complexity::Advanced => "advanced",
        };
        write!(f, "{}", s)
    }
}

pub const DEFAULT_TIME_SPAN_DAYS: u32 = 30;
pub const DEFAULT_DECISION_POINTS: u32 = 2;

/// Longest time span accepted from configuration (ten years).
pub const MAX_TIME_SPAN_DAYS: u32 = 3650;

/// Spans at or below this many days start at the golden-hour decision.
pub const RECENT_INCIDENT_DAYS: u32 = 7;

/// Caller options; every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioOptions {
    pub complexity: Complexity,
    pub case_type: CaseType,
    #[serde(alias = "timeSpan")]
    pub time_span_days: u32,
    /// Accepted for compatibility; the authored content has a fixed size.
    pub decision_points: u32,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            complexity: Complexity::default(),
            case_type: CaseType::default(),
            time_span_days: DEFAULT_TIME_SPAN_DAYS,
            decision_points: DEFAULT_DECISION_POINTS,
        }
    }
}

impl ScenarioOptions {
    pub fn with_case_type(mut self, case_type: CaseType) -> Self {
        self.case_type = case_type;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_time_span_days(mut self, days: u32) -> Self {
        self.time_span_days = days;
        self
    }

    /// True when the incident is recent enough to still act in the golden hour.
    pub fn is_recent_incident(&self) -> bool {
        self.time_span_days <= RECENT_INCIDENT_DAYS
    }
}
