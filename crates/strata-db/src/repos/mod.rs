//! Repository modules implementing CRUD operations for all Strata entities.
//!
//! Each module adds methods to `StrataService` via `impl StrataService` blocks.

pub mod audit;
pub mod component;
pub mod decision;
pub mod model;
pub mod project;
pub mod zone;
