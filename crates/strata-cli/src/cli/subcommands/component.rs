use clap::{Args, Subcommand};

/// Component commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ComponentCommands {
    /// Create a component.
    Create {
        #[arg(long)]
        zone: String,
        #[arg(long = "type")]
        component_type: String,
        #[arg(long)]
        load_bearing: bool,
        #[arg(long, default_value_t = 0)]
        dependencies: u32,
        /// Number or low/medium/high/critical.
        #[arg(long, default_value = "0")]
        redundancy: String,
        /// Linked 3D model ID.
        #[arg(long)]
        model: Option<String>,
    },
    /// List components of a zone.
    List {
        #[arg(long)]
        zone: String,
    },
    /// Get a component by ID.
    Get { id: String },
    /// Delete a component and its decisions.
    Delete { id: String },
    /// Record a structural edit with the learned scorer.
    Edit(EditArgs),
}

/// Arguments for `strata component edit`.
#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long, default_value = "Structural Edit")]
    pub edit_type: String,
    /// Span length in metres.
    #[arg(long, default_value_t = 12.5)]
    pub span: f64,
    /// Cost impact in currency units.
    #[arg(long, default_value_t = 75_000.0)]
    pub cost: f64,
    /// Schedule delay in days.
    #[arg(long, default_value_t = 7.0)]
    pub delay: f64,
    #[arg(long)]
    pub mitigation: bool,
}
