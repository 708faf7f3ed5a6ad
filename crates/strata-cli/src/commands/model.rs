use crate::cli::GlobalFlags;
use crate::cli::subcommands::ModelCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata model`.
pub async fn handle(action: &ModelCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ModelCommands::Create {
            project,
            category,
            name,
            asset,
        } => {
            let model = ctx
                .service
                .create_model(project, category, name, asset)
                .await?;
            output(&model, flags.format)
        }
        ModelCommands::Categories => {
            let categories = ctx.service.list_model_categories().await?;
            output(&categories, flags.format)
        }
        ModelCommands::List { category } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let models = ctx.service.list_models_by_category(category, limit).await?;
            output(&models, flags.format)
        }
        ModelCommands::Get { id } => {
            let model = ctx.service.get_model(id).await?;
            output(&model, flags.format)
        }
    }
}
