//! Decode, upgrade and normalize.

use crate::codec::{BomDecoder, Encoding};
use crate::config::DetectionConfig;
use crate::detection::{trial_decode, Detected, FormatDetector, UnrecognizedSchemaError};
use crate::error::{ErrorContext, MigrateError};
use crate::model::{v1_2, SchemaVersion};
use crate::normalize::normalize;
use crate::upgrade::upgrade_to_latest;
use rayon::prelude::*;
use std::path::Path;

/// A document brought to the newest revision, plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBom {
    /// The upgraded, normalized document
    pub bom: v1_2::Bom,
    /// Revision the input was written in
    pub source_version: SchemaVersion,
    /// Encoding the input was written in
    pub source_encoding: Encoding,
}

impl LoadedBom {
    /// Number of upgrade steps that were applied.
    #[must_use]
    pub const fn upgrade_steps(&self) -> usize {
        self.source_version.steps_to_latest()
    }

    /// Whether the input was already at the newest revision.
    #[must_use]
    pub fn was_latest(&self) -> bool {
        self.source_version == SchemaVersion::LATEST
    }

    /// Consume and return the document.
    #[must_use]
    pub fn into_bom(self) -> v1_2::Bom {
        self.bom
    }
}

impl From<Detected> for LoadedBom {
    fn from(detected: Detected) -> Self {
        let Detected {
            version,
            encoding,
            bom,
        } = detected;
        tracing::debug!(
            "Upgrading from CycloneDX {version} ({} step(s))",
            version.steps_to_latest()
        );
        Self {
            bom: normalize(upgrade_to_latest(bom)),
            source_version: version,
            source_encoding: encoding,
        }
    }
}

/// Load a document into the newest revision.
///
/// `decoders` are tried newest revision first; the matching tree is
/// upgraded through every intermediate revision and normalized.
pub fn load(
    content: &str,
    decoders: &[&dyn BomDecoder],
) -> Result<v1_2::Bom, UnrecognizedSchemaError> {
    load_detected(content, decoders).map(LoadedBom::into_bom)
}

/// Like [`load`], but also report the source revision and encoding.
pub fn load_detected(
    content: &str,
    decoders: &[&dyn BomDecoder],
) -> Result<LoadedBom, UnrecognizedSchemaError> {
    trial_decode(content, decoders).map(LoadedBom::from)
}

/// Load with an already configured detector.
pub fn load_with(
    content: &str,
    detector: &FormatDetector,
) -> Result<LoadedBom, UnrecognizedSchemaError> {
    detector.detect(content).map(LoadedBom::from)
}

/// Load with every supported decoder and encoding sniffing.
pub fn load_str(content: &str) -> Result<LoadedBom, UnrecognizedSchemaError> {
    load_with(content, &FormatDetector::new())
}

/// Read and load a file, honoring the configured size limit.
pub fn load_file(path: &Path, config: &DetectionConfig) -> crate::error::Result<LoadedBom> {
    let size = std::fs::metadata(path)
        .map_err(|e| MigrateError::io(path, e))?
        .len();
    if size > config.max_file_size {
        return Err(MigrateError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_size,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| MigrateError::io(path, e))?;
    let loaded = load_with(&content, &FormatDetector::from_config(config))
        .with_context(|| format!("loading {}", path.display()))?;

    tracing::info!(
        "Loaded {} (CycloneDX {} {}, {} components)",
        path.display(),
        loaded.source_version,
        loaded.source_encoding,
        loaded.bom.components.as_ref().map_or(0, Vec::len)
    );
    Ok(loaded)
}

/// Load independent documents in parallel.
///
/// Returns one result per input, in input order.
pub fn load_batch<S>(
    contents: &[S],
    detector: &FormatDetector,
) -> Vec<Result<LoadedBom, UnrecognizedSchemaError>>
where
    S: AsRef<str> + Sync,
{
    contents
        .par_iter()
        .map(|content| load_with(content.as_ref(), detector))
        .collect()
}
