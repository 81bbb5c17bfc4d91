//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Save progress to the configured store once a tree is completed
    #[serde(default)]
    pub persist_on_completion: bool,

    /// Include improvement suggestions in the session report
    #[serde(default = "default_coaching")]
    pub coaching: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            persist_on_completion: false,
            coaching: default_coaching(),
        }
    }
}

fn default_coaching() -> bool {
    true
}
