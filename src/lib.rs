//! **Detect, upgrade and normalize CycloneDX documents across schema revisions.**
//!
//! `sbom-migrate` reads a CycloneDX bill of materials written against any
//! supported revision (1.0, 1.1 or 1.2) in JSON or XML, works out which
//! revision it is, upgrades it through every intermediate revision, and
//! returns a canonical 1.2 tree whose empty collections have been folded
//! away so that it survives a round trip unchanged.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: one document tree per revision ([`model::v1_0`], [`model::v1_1`],
//!   [`model::v1_2`]) plus the leaves they share.
//! - **[`codec`]**: JSON and XML codecs for every revision behind the
//!   [`FormatCodec`] and [`BomDecoder`] traits.
//! - **[`detection`]**: trial decoding, newest revision first.
//! - **[`upgrade`]**: the explicit `1.0 → 1.1 → 1.2` chain.
//! - **[`normalize`]**: recursive collapse of empty collections.
//! - **[`pipeline`]**: `load`/`save` plus file and batch helpers.
//! - **[`validation`]**: reference-key, dependency-graph and metadata checks.
//!
//! ## Getting Started
//!
//! ```
//! use sbom_migrate::{load_str, save_as, Encoding, SchemaVersion};
//!
//! let xml = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.0" version="1">
//!   <components>
//!     <component type="library"><name>acme</name><version>1.0</version></component>
//!   </components>
//! </bom>"#;
//!
//! let loaded = load_str(xml)?;
//! assert_eq!(loaded.source_version, SchemaVersion::V1_0);
//!
//! let json = save_as(&loaded.bom, Encoding::Json, true)?;
//! assert!(json.contains(r#""specVersion": "1.2""#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `sbom-migrate` binary wraps the same pipeline: `upgrade`, `detect`
//! and `validate` commands, plus config file helpers.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod detection;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod upgrade;
pub mod validation;

// Re-export main types for convenience
pub use codec::{
    BomDecoder, DecodeErrorKind, EncodeError, Encoding, FormatCodec, JsonCodec,
    StructuralDecodeError, XmlCodec,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use detection::{trial_decode, Detected, FormatDetector, TrialOutcome, UnrecognizedSchemaError};
pub use error::{ErrorContext, MigrateError, OptionContext, Result};
pub use model::{LatestBom, SchemaVersion, VersionedBom};
pub use normalize::{is_normalized, normalize, Normalize};
pub use pipeline::{
    load, load_batch, load_detected, load_file, load_str, save, save_as, save_file, LoadedBom,
};
pub use upgrade::{upgrade_to_latest, upgrade_v1_0, upgrade_v1_1};
pub use validation::{BomValidator, Finding, Severity, ValidationReport};
