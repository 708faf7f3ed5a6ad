use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use strata_assets::{AssetPipeline, AssetStore, CommandMaterialEditor};
use strata_config::{ModelConfig, StrataConfig};
use strata_db::service::StrataService;
use strata_risk::LearnedScorer;
use strata_risk::learned::{BoostingParams, TrainingSettings};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: StrataService,
    pub config: StrataConfig,
    /// Present only when an editor command is configured.
    pub pipeline: Option<AssetPipeline<CommandMaterialEditor>>,
}

impl AppContext {
    /// Load the learned model, open the store, and build the asset pipeline.
    pub async fn init(config: StrataConfig) -> anyhow::Result<Self> {
        let learned = if config.model.enabled {
            LearnedScorer::load_or_train(
                Path::new(&config.model.path),
                &training_settings(&config.model),
            )
        } else {
            tracing::debug!("learned risk model disabled by configuration");
            LearnedScorer::unavailable()
        };

        let trail_dir = config
            .database
            .trail_enabled
            .then(|| PathBuf::from(&config.database.trail_dir));

        let service = StrataService::new_local(&config.database.path, trail_dir, learned)
            .await
            .context("failed to initialize strata-db service")?;

        let pipeline = build_pipeline(&config);

        Ok(Self {
            service,
            config,
            pipeline,
        })
    }
}

/// Training settings described by the `model` configuration section.
#[must_use]
pub fn training_settings(model: &ModelConfig) -> TrainingSettings {
    TrainingSettings {
        params: BoostingParams {
            estimators: model.estimators,
            max_depth: model.max_depth,
            learning_rate: model.learning_rate,
            ..BoostingParams::default()
        },
        sample_count: model.sample_count,
        seed: model.seed,
    }
}

fn build_pipeline(config: &StrataConfig) -> Option<AssetPipeline<CommandMaterialEditor>> {
    if !config.storage.has_editor() {
        return None;
    }
    let store = match AssetStore::from_config(&config.storage) {
        Ok(store) => store,
        Err(error) => {
            tracing::warn!(%error, "asset storage unavailable; model visuals will not refresh");
            return None;
        }
    };
    match CommandMaterialEditor::from_command_line(&config.storage.editor_command) {
        Ok(editor) => {
            let editor = editor
                .with_timeout(Duration::from_secs(config.storage.editor_timeout_secs));
            Some(AssetPipeline::new(store, editor))
        }
        Err(error) => {
            tracing::warn!(%error, "material editor unavailable; model visuals will not refresh");
            None
        }
    }
}
