//! Schema version detection by trial decoding.
//!
//! Documents do not reliably announce their revision in a way that can be
//! checked without parsing, so detection simply tries each registered decoder,
//! newest revision first, and keeps the first tree that decodes. A revision
//! is only "detected" when its own decoder accepts the whole document.

use crate::codec::{BomDecoder, Encoding, JsonCodec, StructuralDecodeError, XmlCodec};
use crate::config::DetectionConfig;
use crate::model::{v1_0, v1_1, v1_2, SchemaVersion, VersionedBom};
use std::fmt::Write as _;
use thiserror::Error;

/// Outcome of a successful detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    /// Revision of the decoder that accepted the document.
    pub version: SchemaVersion,
    /// Encoding of the decoder that accepted the document.
    pub encoding: Encoding,
    /// The decoded tree, still in its source revision.
    pub bom: VersionedBom,
}

/// No decoder accepted the document.
///
/// Carries every individual rejection in the order the decoders were tried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("document does not match any supported CycloneDX schema{}", summarize(.attempts))]
pub struct UnrecognizedSchemaError {
    pub attempts: Vec<StructuralDecodeError>,
}

fn summarize(attempts: &[StructuralDecodeError]) -> String {
    if attempts.is_empty() {
        return " (no decoders were applicable)".to_string();
    }
    let mut out = String::new();
    for attempt in attempts {
        let _ = write!(out, "\n  - {attempt}");
    }
    out
}

/// Result of offering a document to a single decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    Matched(Detected),
    Rejected(StructuralDecodeError),
}

impl TrialOutcome {
    /// Offer `content` to one decoder.
    #[must_use]
    pub fn attempt(decoder: &dyn BomDecoder, content: &str) -> Self {
        match decoder.decode_versioned(content) {
            Ok(bom) => Self::Matched(Detected {
                version: decoder.version(),
                encoding: decoder.encoding(),
                bom,
            }),
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Try each decoder, newest revision first, and return the first success.
///
/// Decoders are stably reordered by descending [`SchemaVersion`], so callers
/// may pass them in any order; decoders of the same revision keep their
/// relative order.
pub fn trial_decode(
    content: &str,
    decoders: &[&dyn BomDecoder],
) -> Result<Detected, UnrecognizedSchemaError> {
    let mut ordered: Vec<&dyn BomDecoder> = decoders.to_vec();
    ordered.sort_by(|a, b| b.version().cmp(&a.version()));

    let mut attempts = Vec::with_capacity(ordered.len());
    for decoder in ordered {
        match TrialOutcome::attempt(decoder, content) {
            TrialOutcome::Matched(detected) => {
                tracing::debug!(
                    version = %detected.version,
                    encoding = %detected.encoding,
                    rejected = attempts.len(),
                    "Schema detected"
                );
                return Ok(detected);
            }
            TrialOutcome::Rejected(err) => {
                tracing::debug!("Decoder rejected document: {err}");
                attempts.push(err);
            }
        }
    }

    Err(UnrecognizedSchemaError { attempts })
}

/// Registered decoders plus the filters applied before trial decoding.
pub struct FormatDetector {
    decoders: Vec<Box<dyn BomDecoder>>,
    sniff_encoding: bool,
    encodings: Option<Vec<Encoding>>,
    min_version: SchemaVersion,
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatDetector {
    /// Detector with a decoder for every supported revision and encoding.
    #[must_use]
    pub fn new() -> Self {
        Self::with_decoders(standard_decoders())
    }

    /// Detector over an explicit decoder set.
    #[must_use]
    pub fn with_decoders(decoders: Vec<Box<dyn BomDecoder>>) -> Self {
        Self {
            decoders,
            sniff_encoding: true,
            encodings: None,
            min_version: SchemaVersion::V1_0,
        }
    }

    /// Standard decoders, filtered by the given configuration.
    #[must_use]
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self {
            decoders: standard_decoders(),
            sniff_encoding: config.sniff_encoding,
            encodings: config.encodings.clone(),
            min_version: config.min_version,
        }
    }

    /// Add another decoder. Registration order breaks ties between
    /// decoders of the same revision.
    pub fn register(&mut self, decoder: Box<dyn BomDecoder>) {
        self.decoders.push(decoder);
    }

    /// Decoders that would be tried for `content`, in registration order.
    #[must_use]
    pub fn candidates(&self, content: &str) -> Vec<&dyn BomDecoder> {
        let sniffed = if self.sniff_encoding {
            Encoding::sniff(content)
        } else {
            None
        };

        self.decoders
            .iter()
            .map(|d| &**d)
            .filter(|d| d.version() >= self.min_version)
            .filter(|d| {
                self.encodings
                    .as_ref()
                    .map_or(true, |allowed| allowed.contains(&d.encoding()))
            })
            .filter(|d| sniffed.map_or(true, |enc| d.encoding() == enc))
            .collect()
    }

    /// Detect the revision of `content`.
    pub fn detect(&self, content: &str) -> Result<Detected, UnrecognizedSchemaError> {
        let candidates = self.candidates(content);
        tracing::debug!(
            "Trying {} of {} decoders",
            candidates.len(),
            self.decoders.len()
        );
        trial_decode(content, &candidates)
    }
}

/// One decoder per supported revision and encoding.
#[must_use]
pub fn standard_decoders() -> Vec<Box<dyn BomDecoder>> {
    vec![
        Box::new(XmlCodec::<v1_2::Bom>::new()),
        Box::new(JsonCodec::<v1_2::Bom>::new()),
        Box::new(XmlCodec::<v1_1::Bom>::new()),
        Box::new(JsonCodec::<v1_1::Bom>::new()),
        Box::new(XmlCodec::<v1_0::Bom>::new()),
        Box::new(JsonCodec::<v1_0::Bom>::new()),
    ]
}
