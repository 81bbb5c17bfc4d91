//! Authored case content.
//!
//! Built once on first use and shared by every generated scenario.

use once_cell::sync::Lazy;

use super::model::{Character, CharacterRole};
use crate::domain::decision::{
    Consequence, ConsequenceType, DecisionOption, DecisionPoint, DecisionTree, Impact,
    OptionCategory,
};

pub const FINANCIAL_TREE_ID: &str = "financial-fraud";
pub const GOLDEN_HOUR_DECISION: &str = "decision-1";
pub const EVIDENCE_DECISION: &str = "decision-2";

pub const FINANCIAL_TITLE: &str = "UPI Fraud Investigation";

pub const FINANCIAL_SUMMARY: &str = "A retired schoolteacher received a call from someone posing as her bank's \
KYC desk. Believing her account would be frozen, she installed a screen-sharing app and read out two OTPs. \
Rs 2,40,000 left her account in four UPI transfers to mule accounts within forty minutes.";

/// Day offset from the start of the span, and what happened.
pub const FINANCIAL_TIMELINE: &[(i64, &str)] = &[
    (0, "Victim receives an SMS warning that her KYC has expired"),
    (1, "Caller claiming to be from the bank's KYC desk phones the victim"),
    (1, "Victim installs a screen-sharing app on the caller's instructions"),
    (2, "Two OTPs are read out to the caller"),
    (2, "Four UPI transfers move Rs 2,40,000 to mule accounts"),
    (3, "Mule accounts are emptied through ATM withdrawals in another state"),
    (5, "Victim notices the debits on her passbook and visits her branch"),
    (6, "Victim approaches the cyber cell to report the fraud"),
];

pub static FINANCIAL_CHARACTERS: Lazy<Vec<Character>> = Lazy::new(|| {
    vec![
        Character::new(
            "Anita Verma",
            CharacterRole::Victim,
            "62-year-old retired schoolteacher, limited familiarity with mobile banking",
        ),
        Character::new(
            "Unknown caller",
            CharacterRole::Suspect,
            "Posed as a bank KYC officer using a spoofed number; part of an organised mule network",
        ),
    ]
});

pub static FINANCIAL_TREE: Lazy<DecisionTree> = Lazy::new(|| {
    let golden_hour = DecisionPoint::new(
        GOLDEN_HOUR_DECISION,
        "Golden hour",
        "The victim reached you within an hour of the last transfer. The money may still be held in the first mule account.",
    )
    .with_description("Decide how to act on a freshly reported UPI fraud.")
    .with_context("Funds reported within the golden hour can often be frozen before they are withdrawn.")
    .with_time_limit(120)
    .with_options(vec![
        DecisionOption::new("report-1930", "Report immediately on the 1930 helpline and national portal", 10)
            .with_feedback("Correct. Immediate reporting lets the banks put a lien on the receiving accounts.")
            .with_consequence(Consequence::new(
                ConsequenceType::Positive,
                "A hold is placed on Rs 1,60,000 still sitting in the first mule account.",
                Impact::High,
            ))
            .with_category(OptionCategory::Escalate)
            .leads_to(EVIDENCE_DECISION)
            .optimal(),
        DecisionOption::new("wait-bank", "Ask the victim to wait for the bank to respond", -5)
            .with_feedback("Waiting lets the mule network withdraw the money before anyone can freeze it.")
            .with_consequence(OptionCategory::Wait.default_consequence())
            .with_category(OptionCategory::Wait)
            .leads_to(EVIDENCE_DECISION),
        DecisionOption::new("fir-first", "Register an FIR before taking any other step", 5)
            .with_feedback("An FIR is needed, but it should not delay the freeze request.")
            .with_consequence(
                Consequence::new(
                    ConsequenceType::Neutral,
                    "The FIR is registered, but part of the money has already moved on.",
                    Impact::Medium,
                )
                .with_delay(1500),
            )
            .with_category(OptionCategory::FileFir)
            .leads_to(EVIDENCE_DECISION),
    ]);

    let evidence = DecisionPoint::new(
        EVIDENCE_DECISION,
        "Preserve evidence",
        "The victim's phone still has the screen-sharing app, the SMS thread and the call log.",
    )
    .with_description("Decide how to secure the digital evidence on the victim's device.")
    .with_time_limit(300)
    .with_options(vec![
        DecisionOption::new(
            "preserve-evidence",
            "Preserve the device, call logs and transaction records, and send notices to the banks and telecom provider",
            15,
        )
        .with_feedback("Correct. A preserved device and timely notices keep the trail admissible.")
        .with_consequence(OptionCategory::CollectEvidence.default_consequence())
        .with_category(OptionCategory::CollectEvidence)
        .optimal(),
        DecisionOption::new("screenshots-only", "Take screenshots of the transactions and return the phone", 0)
            .with_feedback("Screenshots alone miss metadata that investigators will need later.")
            .with_category(OptionCategory::CollectEvidence),
        DecisionOption::new("factory-reset", "Advise the victim to factory-reset the phone for safety", -10)
            .with_feedback("A reset destroys the app, logs and messages that link the suspects to the fraud.")
            .with_consequence(Consequence::new(
                ConsequenceType::Negative,
                "The remote-access app and its logs are wiped from the device.",
                Impact::High,
            ))
            .with_category(OptionCategory::NotifyVictim),
    ]);

    DecisionTree::new(FINANCIAL_TREE_ID, FINANCIAL_TITLE, vec![golden_hour, evidence], None)
        .with_description("Respond to a UPI fraud reported by an elderly victim.")
});
