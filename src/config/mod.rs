//! Configuration module for sbom-migrate.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use sbom_migrate::codec::Encoding;
//! use sbom_migrate::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//! assert!(config.validation.enabled);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .encodings(vec![Encoding::Xml])
//!     .pretty(false)
//!     .fail_on_warning(true)
//!     .build();
//! assert!(config.behavior.fail_on_warning);
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-migrate.yaml` file in your project root or `~/.config/sbom-migrate/`:
//!
//! ```yaml
//! detection:
//!   encodings: [xml]
//!   min_version: "1.1"
//! output:
//!   encoding: json
//! behavior:
//!   fail_on_warning: true
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DetectionConfig, OutputConfig,
    ValidationConfig, DEFAULT_MAX_FILE_SIZE,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.sbom-migrate.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        for section in ["detection", "output", "validation", "behavior"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
