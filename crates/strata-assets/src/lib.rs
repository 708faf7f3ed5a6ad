//! # strata-assets
//!
//! External collaborators for 3D model assets:
//! - [`AssetStore`]: publishes binaries to an `object_store` backend and
//!   fetches them back by public reference.
//! - [`MaterialEditor`]: the mesh-editing seam that recolors an asset.
//! - [`AssetPipeline`]: fetch, recolor, and republish in one call.
//! - [`severity_color`]: the color each severity is painted with.
//!
//! Nothing here feeds the risk computation. Every call is fallible and
//! callers treat failure as non-fatal.

pub mod color;
pub mod editor;
pub mod error;
pub mod pipeline;
pub mod store;

pub use color::{Rgb, severity_color};
pub use editor::{CommandMaterialEditor, DEFAULT_EDITOR_TIMEOUT, MaterialEditor};
pub use error::AssetError;
pub use pipeline::AssetPipeline;
pub use store::AssetStore;
