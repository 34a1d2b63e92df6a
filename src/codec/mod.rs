//! Text codecs for every supported schema revision.
//!
//! Two encodings are supported for each revision:
//! - [`JsonCodec`] for the JSON record notation (`bomFormat`/`specVersion` envelope)
//! - [`XmlCodec`] for the XML markup (`<bom xmlns="http://cyclonedx.org/schema/bom/1.x">`)
//!
//! Codecs are deliberately lenient about missing optional fields and strict
//! about shape: a wrong `specVersion`, a wrong namespace or a type mismatch is
//! a [`StructuralDecodeError`]. The detector relies on exactly that split to
//! pick the right revision.
//!
//! ```
//! use sbom_migrate::codec::{FormatCodec, JsonCodec};
//! use sbom_migrate::model::v1_2;
//!
//! let codec = JsonCodec::<v1_2::Bom>::new();
//! let bom = codec
//!     .decode(r#"{"bomFormat": "CycloneDX", "specVersion": "1.2", "version": 1}"#)
//!     .unwrap();
//! assert_eq!(bom.version, Some(1));
//! ```

mod json;
pub mod xml;

pub use json::JsonCodec;
pub use xml::XmlCodec;

use crate::model::{SchemaVersion, VersionedBom};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Textual encoding of a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// JSON record notation
    Json,
    /// XML structured markup
    Xml,
}

impl Encoding {
    /// Guess the encoding from the first non-whitespace character.
    ///
    /// This is a cheap pre-filter for trial decoding, not a validity check.
    #[must_use]
    pub fn sniff(content: &str) -> Option<Self> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        match trimmed.as_bytes().first() {
            Some(b'{') => Some(Self::Json),
            Some(b'<') => Some(Self::Xml),
            _ => None,
        }
    }

    /// Conventional file extension, without the dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Xml => write!(f, "XML"),
        }
    }
}

/// Why a single codec rejected its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    #[error("input is not {0}")]
    WrongEncoding(Encoding),

    #[error("not a CycloneDX document (bomFormat: {found:?})")]
    NotCycloneDx { found: Option<String> },

    #[error("specVersion mismatch: expected {expected}, found {found:?}")]
    SpecVersionMismatch {
        expected: SchemaVersion,
        found: Option<String>,
    },

    #[error("namespace mismatch: expected {expected}, found {found:?}")]
    NamespaceMismatch {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("{0}")]
    Malformed(String),
}

/// A codec could not map its input onto its revision's shape.
///
/// Missing optional fields never cause this; unexpected shapes do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("CycloneDX {version} ({encoding}): {kind}")]
pub struct StructuralDecodeError {
    pub version: SchemaVersion,
    pub encoding: Encoding,
    #[source]
    pub kind: DecodeErrorKind,
}

impl StructuralDecodeError {
    #[must_use]
    pub const fn new(version: SchemaVersion, encoding: Encoding, kind: DecodeErrorKind) -> Self {
        Self {
            version,
            encoding,
            kind,
        }
    }
}

/// Serializing a tree to text failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("JSON serialization failed: {0}")]
    Json(String),

    #[error("XML serialization failed: {0}")]
    Xml(String),
}

/// Decode and encode one revision's document type `B`.
pub trait FormatCodec<B> {
    /// Revision handled by this codec.
    fn version(&self) -> SchemaVersion;

    /// Encoding handled by this codec.
    fn encoding(&self) -> Encoding;

    /// Parse text into a document tree.
    fn decode(&self, content: &str) -> Result<B, StructuralDecodeError>;

    /// Render a document tree as text.
    ///
    /// Callers are expected to pass normalized trees; empty collections are
    /// written as empty elements/arrays rather than omitted.
    fn encode(&self, bom: &B) -> Result<String, EncodeError>;
}

/// Object-safe decoding half of a codec, used for trial decoding.
pub trait BomDecoder: Send + Sync {
    /// Revision this decoder recognizes.
    fn version(&self) -> SchemaVersion;

    /// Encoding this decoder reads.
    fn encoding(&self) -> Encoding;

    /// Decode and tag the result with [`BomDecoder::version`].
    fn decode_versioned(&self, content: &str) -> Result<VersionedBom, StructuralDecodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_encoding() {
        assert_eq!(Encoding::sniff("  {\"a\": 1}"), Some(Encoding::Json));
        assert_eq!(Encoding::sniff("\n<?xml version=\"1.0\"?>"), Some(Encoding::Xml));
        assert_eq!(Encoding::sniff("\u{feff}<bom/>"), Some(Encoding::Xml));
        assert_eq!(Encoding::sniff("SPDXVersion: SPDX-2.3"), None);
        assert_eq!(Encoding::sniff(""), None);
    }

    #[test]
    fn test_structural_error_display() {
        let err = StructuralDecodeError::new(
            SchemaVersion::V1_2,
            Encoding::Xml,
            DecodeErrorKind::NamespaceMismatch {
                expected: SchemaVersion::V1_2.xml_namespace(),
                found: Some("http://cyclonedx.org/schema/bom/1.1".to_string()),
            },
        );
        let display = err.to_string();
        assert!(display.starts_with("CycloneDX 1.2 (XML)"), "{display}");
        assert!(display.contains("namespace mismatch"), "{display}");
    }
}
