//! Object storage for published model assets.
//!
//! Assets live at `projects/{project}/models/{model}/{version}.glb` and are
//! addressed externally as `{public_base}/{path}`. References outside the
//! public base are fetched over HTTP.

use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use strata_config::{StorageBackend, StorageConfig};

use crate::error::AssetError;

const ASSET_EXTENSION: &str = "glb";

/// Publishes and fetches binary model assets.
#[derive(Debug, Clone)]
pub struct AssetStore {
    store: Arc<dyn ObjectStore>,
    public_base: String,
    http: reqwest::Client,
}

impl AssetStore {
    /// Wrap an existing object store.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Http` if the download client cannot be built.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        public_base: impl Into<String>,
    ) -> Result<Self, AssetError> {
        let http = reqwest::Client::builder()
            .user_agent("strata/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            store,
            public_base: public_base.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// A process-local store. Contents vanish on drop.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn in_memory() -> Result<Self, AssetError> {
        Self::new(Arc::new(InMemory::new()), "memory://assets")
    }

    /// Build the backend selected by the `storage` config section.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::NotConfigured` when required fields are
    /// missing, or the backend's own construction error.
    pub fn from_config(config: &StorageConfig) -> Result<Self, AssetError> {
        if !config.is_configured() {
            return Err(AssetError::NotConfigured(format!(
                "backend '{:?}' is missing required fields",
                config.backend
            )));
        }

        let store: Arc<dyn ObjectStore> = match config.backend {
            StorageBackend::Memory => Arc::new(InMemory::new()),
            StorageBackend::Local => {
                std::fs::create_dir_all(&config.local_root)?;
                Arc::new(LocalFileSystem::new_with_prefix(&config.local_root)?)
            }
            StorageBackend::S3 => {
                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(&config.bucket_name)
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key);
                if !config.region.is_empty() {
                    builder = builder.with_region(&config.region);
                }
                if !config.endpoint.is_empty() {
                    builder = builder
                        .with_endpoint(&config.endpoint)
                        .with_allow_http(config.endpoint.starts_with("http://"));
                }
                Arc::new(builder.build()?)
            }
        };

        tracing::debug!(backend = ?config.backend, "asset store ready");
        Self::new(store, config.public_base())
    }

    #[must_use]
    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// Object path for one asset revision.
    #[must_use]
    pub fn object_path(project_id: &str, model_id: &str, version: &str) -> ObjectPath {
        let file = format!("{version}.{ASSET_EXTENSION}");
        ObjectPath::from_iter(["projects", project_id, "models", model_id, file.as_str()])
    }

    /// Upload one asset revision and return its public reference.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::ObjectStore` if the write fails.
    pub async fn publish(
        &self,
        project_id: &str,
        model_id: &str,
        version: &str,
        bytes: Bytes,
    ) -> Result<String, AssetError> {
        let path = Self::object_path(project_id, model_id, version);
        let size = bytes.len();
        self.store.put(&path, PutPayload::from(bytes)).await?;
        let reference = format!("{}/{path}", self.public_base);
        tracing::debug!(%reference, size, "asset published");
        Ok(reference)
    }

    /// Read an asset by reference.
    ///
    /// References under the public base are read from the object store;
    /// anything else is downloaded with HTTP GET.
    ///
    /// # Errors
    ///
    /// Returns `AssetError` if the object is missing or the download fails.
    pub async fn fetch(&self, reference: &str) -> Result<Bytes, AssetError> {
        if let Some(path) = self.path_for_reference(reference)? {
            return Ok(self.store.get(&path).await?.bytes().await?);
        }

        let resp = self.http.get(reference).send().await?.error_for_status()?;
        Ok(resp.bytes().await?)
    }

    fn path_for_reference(&self, reference: &str) -> Result<Option<ObjectPath>, AssetError> {
        let Some(rest) = reference
            .strip_prefix(self.public_base.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(None);
        };
        Ok(Some(ObjectPath::parse(rest)?))
    }
}
