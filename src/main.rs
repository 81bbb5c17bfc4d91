//! cyberdrill - runs a decision tree along its recommended path and prints a report.
//!
//! ```text
//! cyberdrill                       # generate a scenario from configuration
//! cyberdrill trees/phishing.yaml   # load an authored tree
//! cyberdrill --validate-only t.json
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use cyberdrill::adapters::events::{InMemoryEventBus, TracingEventHandler};
use cyberdrill::adapters::storage;
use cyberdrill::application::TrainingSession;
use cyberdrill::config::AppConfig;
use cyberdrill::domain::analysis::{
    DecisionPathEntry, ImprovementSuggestion, OptimalPath, PerformanceMetrics,
};
use cyberdrill::domain::decision::{
    DecisionTree, TreeDefinition, TreeValidation, ALL_TRAINING_EVENTS,
};
use cyberdrill::domain::foundation::{TreeId, UserId};
use cyberdrill::domain::scenario::ScenarioGenerator;
use cyberdrill::logging;
use cyberdrill::ports::EventSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cyberdrill", version, about = "Decision-tree drills for cybercrime investigation")]
struct Cli {
    /// Decision tree file (.json, .yaml or .yml). A scenario is generated when omitted.
    tree_file: Option<PathBuf>,

    /// Trainee id recorded in the progress
    #[arg(short, long, default_value = "cli-trainee")]
    user: String,

    /// Validate the tree and print the result without playing it
    #[arg(long)]
    validate_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    tree_id: TreeId,
    title: String,
    validation: TreeValidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimal_path: Option<OptimalPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<PerformanceMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decision_path: Vec<DecisionPathEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<ImprovementSuggestion>,
}

impl Report {
    fn validation_only(tree: &DecisionTree, validation: TreeValidation) -> Self {
        Self {
            tree_id: tree.id().clone(),
            title: tree.title().to_string(),
            validation,
            optimal_path: None,
            metrics: None,
            decision_path: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

async fn read_definition(path: &Path) -> Result<TreeDefinition> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let definition = match extension.as_deref() {
        Some("json") => TreeDefinition::from_json(&content)?,
        Some("yaml") | Some("yml") => TreeDefinition::from_yaml(&content)?,
        _ => bail!("unsupported tree file {}: expected .json, .yaml or .yml", path.display()),
    };
    Ok(definition)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    config.validate()?;
    logging::init(&config.logging);

    let definition = match &cli.tree_file {
        Some(path) => read_definition(path).await?,
        None => ScenarioGenerator::new()
            .generate(&config.scenario.options())?
            .into_definition(),
    };

    let tree = DecisionTree::from_definition(definition);
    let validation = tree.validate();
    if !validation.is_valid {
        tracing::error!(tree_id = %tree.id(), error = %validation.message(), "Decision tree is invalid");
        let report = Report::validation_only(&tree, validation);
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
        std::process::exit(1);
    }
    if cli.validate_only {
        let report = Report::validation_only(&tree, validation);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe_all(ALL_TRAINING_EVENTS, Arc::new(TracingEventHandler::new()));

    let mut session = TrainingSession::with_tree(tree, UserId::new(cli.user)?, bus.clone()).await?;

    let plan = session.optimal_path();
    for step in &plan.steps {
        if session.progress().is_completed() {
            break;
        }
        session.make_decision(step.option_id.as_str()).await?;
    }

    if config.features.persist_on_completion && session.progress().is_completed() {
        let store = storage::from_config(&config.storage);
        session.save_progress(store.as_ref()).await?;
    }

    let report = Report {
        tree_id: session.tree().id().clone(),
        title: session.tree().title().to_string(),
        validation,
        optimal_path: Some(plan),
        metrics: Some(session.performance_metrics()),
        decision_path: session.decision_path(),
        suggestions: if config.features.coaching {
            session.improvement_suggestions()
        } else {
            Vec::new()
        },
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
