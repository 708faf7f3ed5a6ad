use serde_json::json;
use strata_core::scale::parse_scale;
use strata_risk::RiskInputs;
use strata_risk::deterministic;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::output::output;

/// Handle `strata score`.
pub fn handle(args: &ScoreArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let inputs = inputs_from_args(args)?;
    let assessment = deterministic::score(inputs);
    output(
        &json!({
            "inputs": inputs.sanitized(),
            "assessment": assessment,
            "explanation": assessment.explanation(inputs.mitigation_flag),
        }),
        flags.format,
    )
}

fn inputs_from_args(args: &ScoreArgs) -> anyhow::Result<RiskInputs> {
    if let Some(raw) = &args.json {
        return serde_json::from_str(raw)
            .map_err(|error| anyhow::anyhow!("invalid score input JSON: {error}"));
    }
    Ok(RiskInputs {
        regulatory_level: parse_scale(&args.regulatory),
        importance_factor: parse_scale(&args.importance),
        load_bearing: args.load_bearing,
        dependency_count: args.dependencies,
        redundancy_level: parse_scale(&args.redundancy),
        mitigation_flag: args.mitigation,
    })
}
