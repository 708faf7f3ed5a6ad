use std::path::PathBuf;

use serde::Serialize;
use strata_config::StrataConfig;
use strata_risk::LearnedScorer;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TrainArgs;
use crate::context::training_settings;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TrainResponse {
    path: String,
    sample_count: usize,
    seed: u64,
    estimators: usize,
    max_depth: usize,
}

/// Handle `strata train`. Always refits, replacing any persisted model.
pub fn handle(args: &TrainArgs, config: &StrataConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut settings = training_settings(&config.model);
    if let Some(samples) = args.samples {
        settings.sample_count = samples;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    let path = PathBuf::from(args.output.as_deref().unwrap_or(&config.model.path));

    let scorer = LearnedScorer::train(&settings)?;
    scorer.save(&path)?;

    output(
        &TrainResponse {
            path: path.display().to_string(),
            sample_count: settings.sample_count,
            seed: settings.seed,
            estimators: settings.params.estimators,
            max_depth: settings.params.max_depth,
        },
        flags.format,
    )
}
