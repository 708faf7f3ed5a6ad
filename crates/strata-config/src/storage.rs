//! Object storage for 3D model assets.

use serde::{Deserialize, Serialize};

/// Which `object_store` backend holds published assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on exit.
    #[default]
    Memory,
    /// A directory on disk (`local_root`).
    Local,
    /// S3 or an S3-compatible endpoint.
    S3,
}

fn default_bucket_name() -> String {
    String::from("glb-models")
}

fn default_local_root() -> String {
    String::from(".strata/assets")
}

const fn default_editor_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the `local` backend.
    #[serde(default = "default_local_root")]
    pub local_root: String,

    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    /// Custom S3 endpoint (MinIO, R2, ...). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Prefix for public asset URLs. Empty derives one from the backend.
    #[serde(default)]
    pub public_base_url: String,

    /// External mesh recolor executable. Empty disables visual refresh.
    #[serde(default)]
    pub editor_command: String,

    /// Seconds the editor may run before it is killed.
    #[serde(default = "default_editor_timeout_secs")]
    pub editor_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            local_root: default_local_root(),
            bucket_name: default_bucket_name(),
            endpoint: String::new(),
            region: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
            editor_command: String::new(),
            editor_timeout_secs: default_editor_timeout_secs(),
        }
    }
}

impl StorageConfig {
    /// Check if the selected backend has the fields it needs.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StorageBackend::Memory => true,
            StorageBackend::Local => !self.local_root.is_empty(),
            StorageBackend::S3 => {
                !self.bucket_name.is_empty()
                    && !self.access_key_id.is_empty()
                    && !self.secret_access_key.is_empty()
            }
        }
    }

    /// Base URL under which published assets are addressed.
    #[must_use]
    pub fn public_base(&self) -> String {
        if !self.public_base_url.is_empty() {
            return self.public_base_url.trim_end_matches('/').to_string();
        }
        match self.backend {
            StorageBackend::Memory => String::from("memory://assets"),
            StorageBackend::Local => format!("file://{}", self.local_root.trim_end_matches('/')),
            StorageBackend::S3 if !self.endpoint.is_empty() => format!(
                "{}/{}",
                self.endpoint.trim_end_matches('/'),
                self.bucket_name
            ),
            StorageBackend::S3 => format!("https://{}.s3.amazonaws.com", self.bucket_name),
        }
    }

    #[must_use]
    pub fn has_editor(&self) -> bool {
        !self.editor_command.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_in_memory_and_configured() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.bucket_name, "glb-models");
        assert!(config.is_configured());
        assert!(!config.has_editor());
        assert_eq!(config.editor_timeout_secs, 120);
        assert_eq!(config.public_base(), "memory://assets");
    }

    #[test]
    fn s3_needs_credentials() {
        let config = StorageConfig {
            backend: StorageBackend::S3,
            ..StorageConfig::default()
        };
        assert!(!config.is_configured());
        assert_eq!(
            config.public_base(),
            "https://glb-models.s3.amazonaws.com"
        );
    }

    #[test]
    fn custom_endpoint_and_public_base() {
        let config = StorageConfig {
            backend: StorageBackend::S3,
            endpoint: "http://localhost:9000/".into(),
            ..StorageConfig::default()
        };
        assert_eq!(config.public_base(), "http://localhost:9000/glb-models");

        let config = StorageConfig {
            public_base_url: "https://cdn.example.com/".into(),
            ..config
        };
        assert_eq!(config.public_base(), "https://cdn.example.com");
    }
}
