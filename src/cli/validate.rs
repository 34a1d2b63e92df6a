//! Validate command handler.
//!
//! Implements the `validate` subcommand: load a document, upgrade it, and
//! report reference-key, dependency-graph and metadata findings.

use super::ReportStyle;
use crate::config::AppConfig;
use crate::pipeline::{exit_code_for, load_file, write_output, OutputTarget};
use crate::validation::{BomValidator, Severity, ValidationReport};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Run the validate command, returning the process exit code.
pub fn run_validate(
    input: &Path,
    config: &AppConfig,
    style: ReportStyle,
    output_file: Option<PathBuf>,
) -> Result<i32> {
    let loaded = load_file(input, &config.detection)?;
    let report = BomValidator::new(config.validation.clone()).validate(&loaded.bom);

    let content = match style {
        ReportStyle::Json => serde_json::to_string_pretty(&report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize validation JSON: {e}"))?,
        ReportStyle::Text => format_report_text(&report),
    };
    write_output(&content, &OutputTarget::from_option(output_file), config.behavior.quiet)?;

    Ok(exit_code_for(&report, config.behavior.fail_on_warning))
}

pub(crate) fn format_report_text(report: &ValidationReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Status: {} ({} errors, {} warnings, {} info)",
        if report.is_valid() { "VALID" } else { "INVALID" },
        report.error_count,
        report.warning_count,
        report.info_count
    ));
    lines.push(String::new());

    if report.findings.is_empty() {
        lines.push("No findings.".to_string());
        return lines.join("\n");
    }

    for finding in &report.findings {
        let severity = match finding.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        let element = finding.element.as_deref().unwrap_or("-");
        lines.push(format!(
            "[{}] {} | {}",
            severity,
            finding.category.name(),
            element
        ));
        lines.push(format!("  {}", finding.message));
    }

    lines.join("\n")
}
