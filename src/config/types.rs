//! Configuration types for sbom-migrate operations.
//!
//! Provides structured configuration for detection, output and validation.

use crate::codec::Encoding;
use crate::model::SchemaVersion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest input file accepted by default (512 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Schema detection settings
    pub detection: DetectionConfig,
    /// Output settings (encoding, formatting, destination)
    pub output: OutputConfig,
    /// Post-load validation settings
    pub validation: ValidationConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for [`AppConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Only try decoders for these encodings.
    pub fn encodings(mut self, encodings: Vec<Encoding>) -> Self {
        self.config.detection.encodings = Some(encodings);
        self
    }

    /// Skip decoders older than `version`.
    pub const fn min_version(mut self, version: SchemaVersion) -> Self {
        self.config.detection.min_version = version;
        self
    }

    /// Try every decoder instead of sniffing the encoding first.
    pub const fn sniff_encoding(mut self, sniff: bool) -> Self {
        self.config.detection.sniff_encoding = sniff;
        self
    }

    /// Set the output encoding.
    pub const fn output_encoding(mut self, encoding: Encoding) -> Self {
        self.config.output.encoding = Some(encoding);
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Write indented output.
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.output.pretty = pretty;
        self
    }

    /// Enable or disable post-load validation.
    pub const fn validate(mut self, enabled: bool) -> Self {
        self.config.validation.enabled = enabled;
        self
    }

    /// Treat dangling dependency references as errors.
    pub const fn fail_on_dangling_refs(mut self, fail: bool) -> Self {
        self.config.validation.fail_on_dangling_refs = fail;
        self
    }

    /// Exit non-zero on validation warnings.
    pub const fn fail_on_warning(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_warning = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// Which decoders take part in trial decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectionConfig {
    /// Skip decoders whose encoding does not match the first character of the input
    pub sniff_encoding: bool,
    /// Restrict decoding to these encodings (all when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encodings: Option<Vec<Encoding>>,
    /// Oldest schema revision to accept
    pub min_version: SchemaVersion,
    /// Refuse input files larger than this many bytes
    pub max_file_size: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sniff_encoding: true,
            encodings: None,
            min_version: SchemaVersion::V1_0,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// How upgraded documents are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output encoding (defaults to the input's encoding)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    /// Indent the output
    pub pretty: bool,
    /// Output file path (stdout when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoding: None,
            pretty: true,
            file: None,
        }
    }
}

/// Which checks run after a document is loaded, and how strict they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run validation after loading
    pub enabled: bool,
    /// Report duplicate reference keys as errors instead of warnings
    pub fail_on_duplicate_refs: bool,
    /// Report dangling dependency references as errors instead of warnings
    pub fail_on_dangling_refs: bool,
    /// Report dependency cycles as informational findings
    pub report_cycles: bool,
    /// Check SPDX license expression syntax
    pub check_license_expressions: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fail_on_duplicate_refs: true,
            fail_on_dangling_refs: false,
            report_cycles: true,
            check_license_expressions: true,
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 2 when validation produces warnings
    pub fail_on_warning: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
