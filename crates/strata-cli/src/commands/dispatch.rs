use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Zone { action } => commands::zone::handle(&action, ctx, flags).await,
        Commands::Component { action } => commands::component::handle(&action, ctx, flags).await,
        Commands::Decision { action } => commands::decision::handle(&action, ctx, flags).await,
        Commands::Model { action } => commands::model::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Seed => commands::seed::handle(ctx, flags).await,
        Commands::Score(_) | Commands::Predict(_) | Commands::Train(_) => {
            unreachable!("score/predict/train are pre-dispatched in main")
        }
    }
}
