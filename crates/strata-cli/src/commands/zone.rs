use serde_json::json;
use strata_core::enums::InspectionLevel;
use strata_core::scale::parse_scale;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ZoneCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata zone`.
pub async fn handle(action: &ZoneCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ZoneCommands::Create {
            project,
            name,
            importance,
            inspection,
        } => {
            let zone = ctx
                .service
                .create_zone(
                    project,
                    name,
                    parse_scale(importance),
                    InspectionLevel::parse_lenient(inspection),
                )
                .await?;
            output(&zone, flags.format)
        }
        ZoneCommands::List { project } => {
            let zones = ctx.service.list_zones(project).await?;
            output(&zones, flags.format)
        }
        ZoneCommands::Delete { id } => {
            ctx.service.delete_zone(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
