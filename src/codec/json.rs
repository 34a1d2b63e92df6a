//! JSON codec.
//!
//! JSON documents carry their revision in the `specVersion` field next to
//! `bomFormat: "CycloneDX"`. The decoder checks both before mapping the rest
//! of the object onto the revision's tree, so a 1.1 document is rejected by
//! the 1.2 codec even though its fields would fit.

use super::{BomDecoder, DecodeErrorKind, EncodeError, Encoding, FormatCodec, StructuralDecodeError};
use crate::model::{SchemaModel, SchemaVersion, VersionedBom, BOM_FORMAT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// JSON codec for the document type `B`.
pub struct JsonCodec<B> {
    pretty: bool,
    _bom: PhantomData<fn() -> B>,
}

impl<B> JsonCodec<B> {
    /// Codec that writes indented output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pretty: true,
            _bom: PhantomData,
        }
    }

    /// Codec that writes single-line output.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            pretty: false,
            _bom: PhantomData,
        }
    }

    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<B> Default for JsonCodec<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for JsonCodec<B> {
    fn clone(&self) -> Self {
        Self {
            pretty: self.pretty,
            _bom: PhantomData,
        }
    }
}

impl<B> std::fmt::Debug for JsonCodec<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec")
            .field("version", &std::any::type_name::<B>())
            .field("pretty", &self.pretty)
            .finish()
    }
}

/// Root-level fields shared by every revision.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, B> {
    bom_format: &'static str,
    spec_version: &'static str,
    #[serde(flatten)]
    bom: &'a B,
}

/// A header field's string value. Present but non-string values are malformed.
fn header_field(
    root: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<Option<String>, DecodeErrorKind> {
    match root.get(key) {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DecodeErrorKind::Malformed(format!(
            "`{key}` must be a string, found {other}"
        ))),
    }
}

impl<B> FormatCodec<B> for JsonCodec<B>
where
    B: SchemaModel + Serialize + DeserializeOwned,
{
    fn version(&self) -> SchemaVersion {
        B::VERSION
    }

    fn encoding(&self) -> Encoding {
        Encoding::Json
    }

    fn decode(&self, content: &str) -> Result<B, StructuralDecodeError> {
        let fail = |kind| StructuralDecodeError::new(B::VERSION, Encoding::Json, kind);

        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|_| fail(DecodeErrorKind::WrongEncoding(Encoding::Json)))?;
        let serde_json::Value::Object(root) = value else {
            return Err(fail(DecodeErrorKind::Malformed(
                "top-level JSON value is not an object".to_string(),
            )));
        };

        let bom_format = header_field(&root, "bomFormat").map_err(fail)?;
        if bom_format.as_deref() != Some(BOM_FORMAT) {
            return Err(fail(DecodeErrorKind::NotCycloneDx { found: bom_format }));
        }

        let spec_version = header_field(&root, "specVersion").map_err(fail)?;
        if spec_version.as_deref() != Some(B::VERSION.as_str()) {
            return Err(fail(DecodeErrorKind::SpecVersionMismatch {
                expected: B::VERSION,
                found: spec_version,
            }));
        }

        serde_json::from_value(serde_json::Value::Object(root))
            .map_err(|e| fail(DecodeErrorKind::Malformed(e.to_string())))
    }

    fn encode(&self, bom: &B) -> Result<String, EncodeError> {
        let envelope = Envelope {
            bom_format: BOM_FORMAT,
            spec_version: B::VERSION.as_str(),
            bom,
        };
        let result = if self.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        };
        result.map_err(|e| EncodeError::Json(e.to_string()))
    }
}

impl<B> BomDecoder for JsonCodec<B>
where
    B: SchemaModel + Serialize + DeserializeOwned,
{
    fn version(&self) -> SchemaVersion {
        B::VERSION
    }

    fn encoding(&self) -> Encoding {
        Encoding::Json
    }

    fn decode_versioned(&self, content: &str) -> Result<VersionedBom, StructuralDecodeError> {
        FormatCodec::decode(self, content).map(SchemaModel::into_versioned)
    }
}
