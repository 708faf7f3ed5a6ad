use serde_json::json;
use strata_core::scale::parse_scale;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            name,
            project_type,
            regulatory,
        } => {
            let project = ctx
                .service
                .create_project(name, project_type, parse_scale(regulatory))
                .await?;
            output(&project, flags.format)
        }
        ProjectCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let projects = ctx.service.list_projects(limit).await?;
            output(&projects, flags.format)
        }
        ProjectCommands::Get { id } => {
            let project = ctx.service.get_project(id).await?;
            let zones = ctx.service.list_zones(id).await?;
            output(&json!({ "project": project, "zones": zones }), flags.format)
        }
        ProjectCommands::Delete { id } => {
            ctx.service.delete_project(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
