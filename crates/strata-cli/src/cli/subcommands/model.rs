use clap::Subcommand;

/// External model commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ModelCommands {
    /// Register a 3D model.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        name: String,
        /// URL or storage reference of the GLB asset.
        #[arg(long)]
        asset: String,
    },
    /// Model categories with counts.
    Categories,
    /// Models in a category.
    List {
        #[arg(long)]
        category: String,
    },
    /// Get a model by ID.
    Get { id: String },
}
