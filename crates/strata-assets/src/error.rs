//! Asset collaborator error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// Object store read or write failed.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// An object path could not be built or parsed.
    #[error("Invalid object path: {0}")]
    Path(#[from] object_store::path::Error),

    /// Downloading a remote asset failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The material editor rejected the asset or exited abnormally.
    #[error("Material editor failed: {0}")]
    Editor(String),

    /// Spawning the editor or touching the local filesystem failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage section does not describe a usable backend.
    #[error("Storage is not configured: {0}")]
    NotConfigured(String),
}
