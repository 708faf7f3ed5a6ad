use clap::Subcommand;

/// Decision commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DecisionCommands {
    /// Score a component with the deterministic scorer and record the decision.
    Record {
        component: String,
        #[arg(long = "type", default_value = "Governance Decision")]
        decision_type: String,
        #[arg(long)]
        mitigation: bool,
    },
    /// List decisions for a component, newest first.
    List {
        #[arg(long)]
        component: String,
    },
    /// Get a decision with its risk event.
    Get { id: String },
}
