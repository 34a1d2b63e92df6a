//! Upgrade command handler.
//!
//! Loads a document of any supported revision, brings it to the newest
//! revision and writes it back out.

use super::validate::format_report_text;
use crate::codec::Encoding;
use crate::config::AppConfig;
use crate::pipeline::{
    encoding_for_path, exit_code_for, exit_codes, load_file, save_as, write_output, OutputTarget,
};
use crate::validation::BomValidator;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the upgrade command, returning the process exit code.
///
/// Validation errors stop the document from being written.
pub fn run_upgrade(input: &Path, config: &AppConfig) -> Result<i32> {
    let loaded = load_file(input, &config.detection)?;
    if !config.behavior.quiet {
        tracing::info!(
            "Upgrading CycloneDX {} {} to {} ({} step(s))",
            loaded.source_version,
            loaded.source_encoding,
            crate::model::SchemaVersion::LATEST,
            loaded.upgrade_steps()
        );
    }

    let mut exit_code = exit_codes::SUCCESS;
    if config.validation.enabled {
        let report = BomValidator::new(config.validation.clone()).validate(&loaded.bom);
        if !report.findings.is_empty() {
            tracing::warn!("Validation findings:\n{}", format_report_text(&report));
        }
        exit_code = exit_code_for(&report, config.behavior.fail_on_warning);
        if exit_code == exit_codes::VALIDATION_ERRORS {
            tracing::error!("Not writing output: document failed validation");
            return Ok(exit_code);
        }
    }

    let encoding = output_encoding(config, loaded.source_encoding);
    let content = save_as(&loaded.bom, encoding, config.output.pretty)
        .context("Failed to encode upgraded document")?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.behavior.quiet)?;

    Ok(exit_code)
}

/// Explicit encoding, else the output file's extension, else the input's.
fn output_encoding(config: &AppConfig, source: Encoding) -> Encoding {
    let from_path = config
        .output
        .file
        .as_deref()
        .and_then(|path| encoding_for_path(path).ok());
    config.output.encoding.or(from_path).unwrap_or(source)
}
