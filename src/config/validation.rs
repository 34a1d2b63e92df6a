//! Configuration validation for sbom-migrate.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, DetectionConfig, OutputConfig, ValidationConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.detection.validate());
        errors.extend(self.output.validate());
        errors.extend(self.validation.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DetectionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref encodings) = self.encodings {
            if encodings.is_empty() {
                errors.push(ConfigError {
                    field: "detection.encodings".to_string(),
                    message: "At least one encoding must be allowed (omit the field to allow all)"
                        .to_string(),
                });
            }
        }

        if self.max_file_size == 0 {
            errors.push(ConfigError {
                field: "detection.max_file_size".to_string(),
                message: "Maximum file size must be greater than zero".to_string(),
            });
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for ValidationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.fail_on_dangling_refs && !self.enabled {
            errors.push(ConfigError {
                field: "validation.fail_on_dangling_refs".to_string(),
                message: "Has no effect while validation.enabled is false".to_string(),
            });
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encoding;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_empty_encoding_list_rejected() {
        let config = DetectionConfig {
            encodings: Some(vec![]),
            ..DetectionConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "detection.encodings");

        let config = DetectionConfig {
            encodings: Some(vec![Encoding::Json]),
            ..DetectionConfig::default()
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_zero_file_size_rejected() {
        let config = DetectionConfig {
            max_file_size: 0,
            ..DetectionConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_missing_output_directory() {
        let config = OutputConfig {
            file: Some("/nonexistent/dir/out.json".into()),
            ..OutputConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors[0].field, "output.file");
    }

    #[test]
    fn test_strictness_without_validation() {
        let config = ValidationConfig {
            enabled: false,
            fail_on_dangling_refs: true,
            ..ValidationConfig::default()
        };
        assert!(!config.is_valid());
    }
}
