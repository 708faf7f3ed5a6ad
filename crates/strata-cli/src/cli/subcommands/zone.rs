use clap::Subcommand;

/// Zone commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ZoneCommands {
    /// Create a zone.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        name: String,
        /// Number or low/medium/high/critical.
        #[arg(long, default_value = "1")]
        importance: String,
        /// normal, enhanced, or regulatory-critical.
        #[arg(long, default_value = "normal")]
        inspection: String,
    },
    /// List zones of a project.
    List {
        #[arg(long)]
        project: String,
    },
    /// Delete a zone and its components.
    Delete { id: String },
}
