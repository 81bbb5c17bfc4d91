//! Default scenario generation settings

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scenario::{
    CaseType, Complexity, ScenarioOptions, DEFAULT_TIME_SPAN_DAYS, MAX_TIME_SPAN_DAYS,
};

/// Scenario settings used when no tree file is supplied
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub case_type: CaseType,

    #[serde(default)]
    pub complexity: Complexity,

    #[serde(default = "default_time_span_days")]
    pub time_span_days: u32,
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_TIME_SPAN_DAYS).contains(&self.time_span_days) {
            return Err(ValidationError::InvalidTimeSpan {
                max: MAX_TIME_SPAN_DAYS,
            });
        }
        Ok(())
    }

    pub fn options(&self) -> ScenarioOptions {
        ScenarioOptions::default()
            .with_case_type(self.case_type)
            .with_complexity(self.complexity)
            .with_time_span_days(self.time_span_days)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            case_type: CaseType::default(),
            complexity: Complexity::default(),
            time_span_days: default_time_span_days(),
        }
    }
}

fn default_time_span_days() -> u32 {
    DEFAULT_TIME_SPAN_DAYS
}
