//! Detect command handler.

use super::ReportStyle;
use crate::codec::Encoding;
use crate::config::AppConfig;
use crate::model::SchemaVersion;
use crate::pipeline::{load_file, write_output, LoadedBom, OutputTarget};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// What detection found out about one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub file: String,
    pub spec_version: SchemaVersion,
    pub encoding: Encoding,
    pub upgrade_steps: usize,
    pub components: usize,
    pub services: usize,
    pub dependencies: usize,
}

impl DetectionSummary {
    fn new(path: &Path, loaded: &LoadedBom) -> Self {
        let len = |n: Option<usize>| n.unwrap_or(0);
        Self {
            file: path.display().to_string(),
            spec_version: loaded.source_version,
            encoding: loaded.source_encoding,
            upgrade_steps: loaded.upgrade_steps(),
            components: len(loaded.bom.components.as_ref().map(Vec::len)),
            services: len(loaded.bom.services.as_ref().map(Vec::len)),
            dependencies: len(loaded.bom.dependencies.as_ref().map(Vec::len)),
        }
    }

    fn to_text(&self) -> String {
        format!(
            "{}: CycloneDX {} ({})\n  upgrade steps: {}\n  components: {}\n  services: {}\n  dependencies: {}",
            self.file,
            self.spec_version,
            self.encoding,
            self.upgrade_steps,
            self.components,
            self.services,
            self.dependencies
        )
    }
}

/// Run the detect command.
///
/// Fails with the list of rejected revisions when nothing matches.
pub fn run_detect(input: &Path, config: &AppConfig, style: ReportStyle) -> Result<()> {
    let loaded = load_file(input, &config.detection)?;
    let summary = DetectionSummary::new(input, &loaded);

    let content = match style {
        ReportStyle::Json => serde_json::to_string_pretty(&summary)?,
        ReportStyle::Text => summary.to_text(),
    };
    write_output(&content, &OutputTarget::Stdout, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::load_str;

    #[test]
    fn test_summary_counts_top_level_entries() {
        let loaded = load_str(
            r#"{"bomFormat": "CycloneDX", "specVersion": "1.1",
                "components": [{"type": "library", "name": "a"}, {"type": "library", "name": "b"}]}"#,
        )
        .unwrap();
        let summary = DetectionSummary::new(Path::new("bom.json"), &loaded);

        assert_eq!(summary.spec_version, SchemaVersion::V1_1);
        assert_eq!(summary.encoding, Encoding::Json);
        assert_eq!(summary.upgrade_steps, 1);
        assert_eq!(summary.components, 2);
        assert_eq!(summary.services, 0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["specVersion"], "1.1");
        assert_eq!(json["encoding"], "json");
        assert!(summary.to_text().starts_with("bom.json: CycloneDX 1.1 (JSON)"));
    }
}
