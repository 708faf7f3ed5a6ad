//! Fetch, recolor, republish.

use chrono::Utc;

use crate::color::Rgb;
use crate::editor::MaterialEditor;
use crate::error::AssetError;
use crate::store::AssetStore;

/// Recolors model assets and publishes the result as a new revision.
#[derive(Debug, Clone)]
pub struct AssetPipeline<E> {
    store: AssetStore,
    editor: E,
}

impl<E: MaterialEditor> AssetPipeline<E> {
    pub const fn new(store: AssetStore, editor: E) -> Self {
        Self { store, editor }
    }

    #[must_use]
    pub const fn store(&self) -> &AssetStore {
        &self.store
    }

    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Repaint the asset at `reference` and return the new reference.
    ///
    /// # Errors
    ///
    /// Returns `AssetError` from any of the three stages. Nothing is
    /// published unless the edit succeeds.
    pub async fn recolor(
        &self,
        project_id: &str,
        model_id: &str,
        reference: &str,
        color: Rgb,
    ) -> Result<String, AssetError> {
        let original = self.store.fetch(reference).await?;
        let edited = self.editor.recolor(original, color).await?;
        let version = format!(
            "{}-{}",
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            &color.hex()[1..]
        );
        let new_reference = self
            .store
            .publish(project_id, model_id, &version, edited)
            .await?;
        tracing::info!(model_id, %color, %new_reference, "model asset recolored");
        Ok(new_reference)
    }
}
