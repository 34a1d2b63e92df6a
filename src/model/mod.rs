//! Versioned CycloneDX document trees.
//!
//! Each supported schema revision has its own module with its own root
//! [`Bom`](v1_2::Bom) and component types. Leaves that did not change across
//! revisions live in [`common`] and are shared.
//!
//! Collections are `Option<Vec<T>>`: `None` means the field was never set,
//! `Some(vec![])` means a decoder materialized an empty collection. The
//! [`normalize`](crate::normalize) pass folds the second into the first.

pub mod common;
pub mod v1_0;
pub mod v1_1;
pub mod v1_2;
mod version;

pub use common::*;
pub use version::{SchemaModel, SchemaVersion, VersionedBom, BOM_FORMAT};

/// Document type of the newest supported revision.
pub type LatestBom = v1_2::Bom;
