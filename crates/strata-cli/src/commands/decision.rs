use strata_db::recorder::ScoringPolicy;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DecisionCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata decision`.
pub async fn handle(
    action: &DecisionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DecisionCommands::Record {
            component,
            decision_type,
            mitigation,
        } => {
            let record = ctx
                .service
                .record_decision(component, decision_type, *mitigation, &ScoringPolicy::Governance)
                .await?;
            if let Some(warning) = &record.escalation_warning {
                if !flags.quiet {
                    eprintln!("{warning}: {}", record.trace_id);
                }
            }
            output(&record, flags.format)
        }
        DecisionCommands::List { component } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let decisions = ctx.service.list_decisions(component, limit).await?;
            output(&decisions, flags.format)
        }
        DecisionCommands::Get { id } => {
            let detail = ctx.service.get_decision_detail(id).await?;
            output(&detail, flags.format)
        }
    }
}
