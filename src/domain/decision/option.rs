//! Decision options and the consequences attached to them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DecisionId, OptionId};

/// Tone of a consequence shown after an option is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsequenceType {
    Positive,
    Negative,
    Neutral,
}

/// How strongly a consequence affects the investigation narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    #[default]
    Medium,
    High,
}

/// A narrative side effect of an option. Purely presentational: consequences
/// never change scoring or branching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consequence {
    #[serde(rename = "type")]
    pub consequence_type: ConsequenceType,
    pub description: String,
    #[serde(default)]
    pub impact: Impact,
    /// Milliseconds to wait before revealing the consequence.
    #[serde(default, rename = "delay")]
    pub delay_ms: u64,
}

impl Consequence {
    pub fn new(
        consequence_type: ConsequenceType,
        description: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            consequence_type,
            description: description.into(),
            impact,
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Procedural category of an option.
///
/// Unknown category strings in authored content deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    Escalate,
    Wait,
    FileFir,
    CollectEvidence,
    ContactBank,
    NotifyVictim,
    #[default]
    #[serde(other)]
    Other,
}

impl OptionCategory {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            OptionCategory::Escalate => "Escalate",
            OptionCategory::Wait => "Wait",
            OptionCategory::FileFir => "File FIR",
            OptionCategory::CollectEvidence => "Collect evidence",
            OptionCategory::ContactBank => "Contact bank",
            OptionCategory::NotifyVictim => "Notify victim",
            OptionCategory::Other => "Other",
        }
    }

    /// Stock consequence for content authors who don't write their own.
    pub fn default_consequence(&self) -> Consequence {
        match self {
            OptionCategory::Escalate => Consequence::new(
                ConsequenceType::Positive,
                "The case reaches specialised investigators while the trail is still fresh.",
                Impact::High,
            ),
            OptionCategory::Wait => Consequence::new(
                ConsequenceType::Negative,
                "Time passes and the suspects keep moving funds and deleting traces.",
                Impact::High,
            ),
            OptionCategory::FileFir => Consequence::new(
                ConsequenceType::Positive,
                "A formal record now exists, giving legal footing for notices and requests.",
                Impact::Medium,
            ),
            OptionCategory::CollectEvidence => Consequence::new(
                ConsequenceType::Positive,
                "Key digital artefacts are secured before they can be altered.",
                Impact::High,
            ),
            OptionCategory::ContactBank => Consequence::new(
                ConsequenceType::Neutral,
                "The bank acknowledges the request and opens an internal ticket.",
                Impact::Medium,
            ),
            OptionCategory::NotifyVictim => Consequence::new(
                ConsequenceType::Neutral,
                "The victim is updated on the status of the case.",
                Impact::Low,
            ),
            OptionCategory::Other => Consequence::new(
                ConsequenceType::Neutral,
                "The investigation continues.",
                Impact::Low,
            ),
        }
    }
}

/// One selectable choice at a decision point.
///
/// Built once with the `with_*` methods and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    id: OptionId,
    text: String,
    description: Option<String>,
    points: i32,
    feedback: String,
    consequences: Vec<Consequence>,
    next_decision_id: Option<DecisionId>,
    is_optimal: bool,
    category: OptionCategory,
}

impl DecisionOption {
    /// Creates a terminal, non-optimal option with no feedback.
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>, points: i32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: None,
            points,
            feedback: String::new(),
            consequences: Vec::new(),
            next_decision_id: None,
            is_optimal: false,
            category: OptionCategory::Other,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.consequences.push(consequence);
        self
    }

    pub fn with_consequences(mut self, consequences: Vec<Consequence>) -> Self {
        self.consequences = consequences;
        self
    }

    /// Points the option at the decision that follows it.
    pub fn leads_to(mut self, next: impl Into<DecisionId>) -> Self {
        self.next_decision_id = Some(next.into());
        self
    }

    pub fn with_next(mut self, next: Option<DecisionId>) -> Self {
        self.next_decision_id = next;
        self
    }

    pub fn optimal(mut self) -> Self {
        self.is_optimal = true;
        self
    }

    pub fn with_optimal(mut self, is_optimal: bool) -> Self {
        self.is_optimal = is_optimal;
        self
    }

    pub fn with_category(mut self, category: OptionCategory) -> Self {
        self.category = category;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn consequences(&self) -> &[Consequence] {
        &self.consequences
    }

    pub fn next_decision_id(&self) -> Option<&DecisionId> {
        self.next_decision_id.as_ref()
    }

    /// True when choosing this option ends the tree.
    pub fn is_terminal(&self) -> bool {
        self.next_decision_id.is_none()
    }

    pub fn is_optimal(&self) -> bool {
        self.is_optimal
    }

    pub fn category(&self) -> OptionCategory {
        self.category
    }
}
