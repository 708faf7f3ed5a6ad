//! # strata-core
//!
//! Core types, ID prefixes, and scale parsing for Strata.
//!
//! This crate provides the foundational types shared across all Strata crates:
//! - Entity structs for the project → zone → component → decision → risk event
//!   hierarchy, plus external 3D-asset model records
//! - Severity, scorer, inspection, and audit enums
//! - ID prefix constants
//! - Ordinal/numeric scale parsing for administrative inputs
//! - Decimal rounding shared by scores and trace stubs
//! - Governance trail envelope for JSONL anchoring
//! - Response types returned by the recorder and the CLI

pub mod entities;
pub mod enums;
pub mod ids;
pub mod responses;
pub mod rounding;
pub mod scale;
pub mod trail;
