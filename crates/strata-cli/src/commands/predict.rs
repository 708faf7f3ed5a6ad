use std::path::Path;

use strata_config::StrataConfig;
use strata_risk::{FeatureVector, LearnedScorer};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::context::training_settings;
use crate::output::output;

/// Handle `strata predict`.
pub fn handle(args: &PredictArgs, config: &StrataConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let features = FeatureVector::try_from(args.features.as_slice())?;
    let scorer = if config.model.enabled {
        LearnedScorer::load_or_train(
            Path::new(&config.model.path),
            &training_settings(&config.model),
        )
    } else {
        LearnedScorer::unavailable()
    };
    output(&scorer.predict(&features), flags.format)
}
