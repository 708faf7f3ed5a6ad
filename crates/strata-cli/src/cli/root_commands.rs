use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    ComponentCommands, DecisionCommands, ModelCommands, ProjectCommands, ZoneCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Zones within a project.
    Zone {
        #[command(subcommand)]
        action: ZoneCommands,
    },
    /// Structural components within a zone.
    Component {
        #[command(subcommand)]
        action: ComponentCommands,
    },
    /// Governance decisions and their risk events.
    Decision {
        #[command(subcommand)]
        action: DecisionCommands,
    },
    /// External 3D models.
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// View audit trail.
    Audit(AuditArgs),
    /// Score inputs with the deterministic scorer. Nothing is stored.
    Score(ScoreArgs),
    /// Score a feature vector with the learned scorer. Nothing is stored.
    Predict(PredictArgs),
    /// Refit the learned model on synthetic data and persist it.
    Train(TrainArgs),
    /// Create a sample portfolio.
    Seed,
}

/// Arguments for `strata audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Filter by entity type (project, zone, component, decision, risk_event, model).
    #[arg(long)]
    pub entity_type: Option<String>,
    /// Filter by entity ID.
    #[arg(long)]
    pub entity_id: Option<String>,
    /// Filter by action (created, deleted, recorded, visual_state_updated).
    #[arg(long)]
    pub action: Option<String>,
}

/// Arguments for `strata score`.
#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// Inputs as a JSON object; lenient, missing fields default to 0.
    #[arg(long, conflicts_with_all = [
        "regulatory", "importance", "load_bearing", "dependencies", "redundancy", "mitigation",
    ])]
    pub json: Option<String>,
    /// Regulatory level: number or low/medium/high/critical.
    #[arg(long, default_value = "0")]
    pub regulatory: String,
    /// Zone importance factor.
    #[arg(long, default_value = "0")]
    pub importance: String,
    #[arg(long)]
    pub load_bearing: bool,
    #[arg(long, default_value_t = 0)]
    pub dependencies: u32,
    /// Redundancy level: number or low/medium/high/critical.
    #[arg(long, default_value = "0")]
    pub redundancy: String,
    #[arg(long)]
    pub mitigation: bool,
}

/// Arguments for `strata predict`.
#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    /// Eight comma-separated features in model order.
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub features: Vec<f64>,
}

/// Arguments for `strata train`.
#[derive(Clone, Debug, Args)]
pub struct TrainArgs {
    /// Synthetic sample count (defaults to configuration).
    #[arg(long)]
    pub samples: Option<usize>,
    /// RNG seed (defaults to configuration).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output path (defaults to `model.path`).
    #[arg(long)]
    pub output: Option<String>,
}
