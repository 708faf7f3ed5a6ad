use serde_json::json;
use strata_core::scale::parse_scale;
use strata_db::repos::component::NewComponent;
use strata_risk::EditParameters;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ComponentCommands, EditArgs};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata component`.
pub async fn handle(
    action: &ComponentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ComponentCommands::Create {
            zone,
            component_type,
            load_bearing,
            dependencies,
            redundancy,
            model,
        } => {
            let component = ctx
                .service
                .create_component(&NewComponent {
                    zone_id: zone.clone(),
                    component_type: component_type.clone(),
                    load_bearing: *load_bearing,
                    dependency_count: *dependencies,
                    redundancy_level: parse_scale(redundancy),
                    model_id: model.clone(),
                })
                .await?;
            output(&component, flags.format)
        }
        ComponentCommands::List { zone } => {
            let components = ctx.service.list_components(zone).await?;
            output(&components, flags.format)
        }
        ComponentCommands::Get { id } => {
            let component = ctx.service.get_component(id).await?;
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let decisions = ctx.service.list_decisions(id, limit).await?;
            output(
                &json!({ "component": component, "decisions": decisions }),
                flags.format,
            )
        }
        ComponentCommands::Delete { id } => {
            ctx.service.delete_component(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        ComponentCommands::Edit(args) => edit(args, ctx, flags).await,
    }
}

async fn edit(args: &EditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let edit = EditParameters {
        edit_type: args.edit_type.clone(),
        span_length: args.span,
        cost_impact: args.cost,
        delay_days: args.delay,
    };
    if !ctx.service.learned().is_available() {
        tracing::warn!("learned risk model unavailable; the edit is recorded as Unavailable");
    }
    let response = ctx
        .service
        .edit_component(&args.id, &edit, args.mitigation, ctx.pipeline.as_ref())
        .await?;
    output(&response, flags.format)
}
