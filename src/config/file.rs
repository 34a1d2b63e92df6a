//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-migrate.yaml",
    ".sbom-migrate.yml",
    "sbom-migrate.yaml",
    "sbom-migrate.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-migrate/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("sbom-migrate")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a CLI layer
    /// built from defaults plus flags can be merged over a file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Detection config
        if other.detection.sniff_encoding != defaults.detection.sniff_encoding {
            self.detection.sniff_encoding = other.detection.sniff_encoding;
        }
        if other.detection.encodings.is_some() {
            self.detection.encodings.clone_from(&other.detection.encodings);
        }
        if other.detection.min_version != defaults.detection.min_version {
            self.detection.min_version = other.detection.min_version;
        }
        if other.detection.max_file_size != defaults.detection.max_file_size {
            self.detection.max_file_size = other.detection.max_file_size;
        }

        // Output config
        if other.output.encoding.is_some() {
            self.output.encoding = other.output.encoding;
        }
        if !other.output.pretty {
            self.output.pretty = false;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }

        // Validation config
        if !other.validation.enabled {
            self.validation.enabled = false;
        }
        if !other.validation.fail_on_duplicate_refs {
            self.validation.fail_on_duplicate_refs = false;
        }
        if other.validation.fail_on_dangling_refs {
            self.validation.fail_on_dangling_refs = true;
        }
        if !other.validation.report_cycles {
            self.validation.report_cycles = false;
        }
        if !other.validation.check_license_expressions {
            self.validation.check_license_expressions = false;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_warning {
            self.behavior.fail_on_warning = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# sbom-migrate configuration
# Place this file at .sbom-migrate.yaml in your project root or ~/.config/sbom-migrate/

{}
",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# sbom-migrate configuration file
# ================================
#
# Place it at:
#   - .sbom-migrate.yaml in your project root
#   - ~/.config/sbom-migrate/sbom-migrate.yaml for global config
#
# CLI arguments always override file settings.

# Schema detection
detection:
  # Only try decoders whose encoding matches the first character of the input
  sniff_encoding: true
  # Restrict decoding to these encodings: json, xml
  # encodings: [xml]
  # Oldest schema revision to accept: "1.0", "1.1", "1.2"
  min_version: "1.0"
  # Refuse larger inputs (bytes)
  max_file_size: 536870912

# Output
output:
  # Encoding: json, xml (defaults to the input's encoding)
  # encoding: json
  pretty: true
  # file: upgraded.json

# Validation after loading
validation:
  enabled: true
  fail_on_duplicate_refs: true
  fail_on_dangling_refs: false
  report_cycles: true
  check_license_expressions: true

# Behavior flags
behavior:
  # Exit with code 2 when validation reports warnings
  fail_on_warning: false
  quiet: false
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encoding;
    use crate::model::SchemaVersion;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".sbom-migrate.yaml");
        std::fs::write(&config_path, "output:\n  pretty: false\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
detection:
  encodings: [xml]
  min_version: "1.1"
validation:
  fail_on_dangling_refs: true
behavior:
  fail_on_warning: true
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.detection.encodings, Some(vec![Encoding::Xml]));
        assert_eq!(config.detection.min_version, SchemaVersion::V1_1);
        assert!(config.validation.fail_on_dangling_refs);
        assert!(config.behavior.fail_on_warning);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "detection: [not, a, map]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .encodings(vec![Encoding::Json])
            .build();
        let overrides = AppConfig::builder()
            .output_encoding(Encoding::Xml)
            .pretty(false)
            .fail_on_warning(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.detection.encodings, Some(vec![Encoding::Json]));
        assert_eq!(base.output.encoding, Some(Encoding::Xml));
        assert!(!base.output.pretty);
        assert!(base.behavior.fail_on_warning);
    }

    #[test]
    fn test_generated_examples_parse() {
        let example = generate_example_config();
        assert!(example.contains("detection:"));
        let parsed: AppConfig = serde_yaml_ng::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml_ng::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "behavior:\n  quiet: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
