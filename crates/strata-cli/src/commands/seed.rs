use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata seed`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = ctx.service.seed_sample_data().await?;
    output(&summary, flags.format)
}
