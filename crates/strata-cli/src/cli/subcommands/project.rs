use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        project_type: String,
        /// Number or low/medium/high/critical.
        #[arg(long, default_value = "0")]
        regulatory: String,
    },
    /// List projects, newest first.
    List,
    /// Get a project by ID.
    Get { id: String },
    /// Delete a project and everything under it.
    Delete { id: String },
}
