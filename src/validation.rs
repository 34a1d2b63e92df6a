//! Reference-key and graph checks on top of a loaded document.
//!
//! Nothing in the model prevents two components from sharing a `bom-ref`, a
//! dependency from naming a key that does not exist, or the dependency graph
//! from looping. Loading stays permissive; this pass reports those conditions
//! as findings so callers can decide what to reject.

use crate::config::ValidationConfig;
use crate::model::v1_2::{Bom, Component, Service};
use crate::model::LicenseChoice;
use indexmap::IndexMap;
use pathfinding::directed::strongly_connected_components::strongly_connected_components;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static SERIAL_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("static regex")
});

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document should be rejected
    Error,
    /// Suspicious, but the document is usable
    Warning,
    /// Worth knowing, never a failure
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// What part of the document a finding concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingCategory {
    /// Duplicate or malformed reference keys
    ReferenceKeys,
    /// Dangling edges and cycles
    DependencyGraph,
    /// Serial number and timestamp format
    DocumentMetadata,
    /// License expression syntax
    LicenseInfo,
}

impl FindingCategory {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReferenceKeys => "Reference Keys",
            Self::DependencyGraph => "Dependency Graph",
            Self::DocumentMetadata => "Document Metadata",
            Self::LicenseInfo => "License Information",
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    /// Human-readable message
    pub message: String,
    /// Location or reference key the finding is about
    pub element: Option<String>,
}

/// All findings for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn new(findings: Vec<Finding>) -> Self {
        let count = |severity| findings.iter().filter(|f| f.severity == severity).count();
        let error_count = count(Severity::Error);
        let warning_count = count(Severity::Warning);
        let info_count = count(Severity::Info);
        Self {
            findings,
            error_count,
            warning_count,
            info_count,
        }
    }

    /// No error-level findings.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error_count == 0
    }

    /// Findings of one category.
    pub fn by_category(&self, category: FindingCategory) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}

/// Every reference key in the document, with the locations that declare it.
///
/// Walks top-level and nested components, the components inside pedigrees,
/// the metadata component, and nested services. Keys keep first-seen order.
#[must_use]
pub fn collect_bom_refs(bom: &Bom) -> IndexMap<String, Vec<String>> {
    let mut refs: IndexMap<String, Vec<String>> = IndexMap::new();

    if let Some(component) = bom.metadata.as_ref().and_then(|m| m.component.as_ref()) {
        visit_component(component, "metadata.component".to_string(), &mut refs);
    }
    for (i, component) in bom.components.iter().flatten().enumerate() {
        visit_component(component, format!("components[{i}]"), &mut refs);
    }
    for (i, service) in bom.services.iter().flatten().enumerate() {
        visit_service(service, format!("services[{i}]"), &mut refs);
    }

    refs
}

fn visit_component(component: &Component, path: String, refs: &mut IndexMap<String, Vec<String>>) {
    if let Some(bom_ref) = &component.bom_ref {
        refs.entry(bom_ref.clone()).or_default().push(path.clone());
    }
    if let Some(pedigree) = &component.pedigree {
        let trees = [
            ("ancestors", &pedigree.ancestors),
            ("descendants", &pedigree.descendants),
            ("variants", &pedigree.variants),
        ];
        for (name, tree) in trees {
            for (i, child) in tree.iter().flatten().enumerate() {
                visit_component(child, format!("{path}.pedigree.{name}[{i}]"), refs);
            }
        }
    }
    for (i, child) in component.components.iter().flatten().enumerate() {
        visit_component(child, format!("{path}.components[{i}]"), refs);
    }
}

fn visit_service(service: &Service, path: String, refs: &mut IndexMap<String, Vec<String>>) {
    if let Some(bom_ref) = &service.bom_ref {
        refs.entry(bom_ref.clone()).or_default().push(path.clone());
    }
    for (i, child) in service.services.iter().flatten().enumerate() {
        visit_service(child, format!("{path}.services[{i}]"), refs);
    }
}

/// Reference keys declared more than once, with every declaring location.
#[must_use]
pub fn duplicate_refs(bom: &Bom) -> Vec<(String, Vec<String>)> {
    collect_bom_refs(bom)
        .into_iter()
        .filter(|(_, locations)| locations.len() > 1)
        .collect()
}

/// Dependency-graph keys that no component or service declares.
///
/// Each dangling key is reported once, in order of first use.
#[must_use]
pub fn dangling_refs(bom: &Bom) -> Vec<String> {
    let declared = collect_bom_refs(bom);
    let mut seen = HashSet::new();
    let mut dangling = Vec::new();

    for dependency in bom.dependencies.iter().flatten() {
        let targets = dependency.depends_on.iter().flatten();
        for key in std::iter::once(&dependency.dependency_ref).chain(targets) {
            if !declared.contains_key(key) && seen.insert(key.clone()) {
                dangling.push(key.clone());
            }
        }
    }
    dangling
}

/// Cycles in the dependency graph, one entry per strongly connected
/// component that loops (including self-edges).
#[must_use]
pub fn dependency_cycles(bom: &Bom) -> Vec<Vec<String>> {
    let mut edges: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for dependency in bom.dependencies.iter().flatten() {
        let targets = edges.entry(dependency.dependency_ref.as_str()).or_default();
        targets.extend(dependency.depends_on.iter().flatten().map(String::as_str));
    }
    if edges.is_empty() {
        return Vec::new();
    }

    let starts: Vec<&str> = edges.keys().copied().collect();
    let components = strongly_connected_components(&starts, |node: &&str| {
        edges.get(node).cloned().unwrap_or_default()
    });

    components
        .into_iter()
        .filter(|scc| {
            scc.len() > 1
                || scc
                    .first()
                    .is_some_and(|node| edges.get(node).is_some_and(|t| t.contains(node)))
        })
        .map(|scc| scc.into_iter().map(str::to_string).collect())
        .collect()
}

/// Runs every check permitted by a [`ValidationConfig`].
#[derive(Debug, Clone, Default)]
pub struct BomValidator {
    config: ValidationConfig,
}

impl BomValidator {
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn validate(&self, bom: &Bom) -> ValidationReport {
        let mut findings = Vec::new();

        self.check_reference_keys(bom, &mut findings);
        self.check_dependency_graph(bom, &mut findings);
        Self::check_metadata(bom, &mut findings);
        if self.config.check_license_expressions {
            Self::check_licenses(bom, &mut findings);
        }

        let report = ValidationReport::new(findings);
        tracing::debug!(
            errors = report.error_count,
            warnings = report.warning_count,
            info = report.info_count,
            "Validation finished"
        );
        report
    }

    fn check_reference_keys(&self, bom: &Bom, findings: &mut Vec<Finding>) {
        let severity = if self.config.fail_on_duplicate_refs {
            Severity::Error
        } else {
            Severity::Warning
        };
        for (bom_ref, locations) in duplicate_refs(bom) {
            findings.push(Finding {
                severity,
                category: FindingCategory::ReferenceKeys,
                message: format!(
                    "Reference key '{bom_ref}' is declared {} times ({})",
                    locations.len(),
                    locations.join(", ")
                ),
                element: Some(bom_ref),
            });
        }

        for (bom_ref, locations) in collect_bom_refs(bom) {
            if bom_ref.trim().is_empty() {
                findings.push(Finding {
                    severity: Severity::Warning,
                    category: FindingCategory::ReferenceKeys,
                    message: "Empty reference key".to_string(),
                    element: locations.into_iter().next(),
                });
            }
        }
    }

    fn check_dependency_graph(&self, bom: &Bom, findings: &mut Vec<Finding>) {
        let severity = if self.config.fail_on_dangling_refs {
            Severity::Error
        } else {
            Severity::Warning
        };
        for key in dangling_refs(bom) {
            findings.push(Finding {
                severity,
                category: FindingCategory::DependencyGraph,
                message: format!("Dependency graph references undeclared key '{key}'"),
                element: Some(key),
            });
        }

        if self.config.report_cycles {
            for cycle in dependency_cycles(bom) {
                findings.push(Finding {
                    severity: Severity::Info,
                    category: FindingCategory::DependencyGraph,
                    message: format!("Dependency cycle: {}", cycle.join(" -> ")),
                    element: cycle.first().cloned(),
                });
            }
        }
    }

    fn check_metadata(bom: &Bom, findings: &mut Vec<Finding>) {
        if let Some(serial) = &bom.serial_number {
            if !SERIAL_NUMBER.is_match(serial) {
                findings.push(Finding {
                    severity: Severity::Warning,
                    category: FindingCategory::DocumentMetadata,
                    message: format!("Serial number '{serial}' is not a urn:uuid"),
                    element: Some("serialNumber".to_string()),
                });
            }
        }

        let timestamp = bom.metadata.as_ref().and_then(|m| m.timestamp.as_deref());
        if let Some(timestamp) = timestamp {
            if chrono::DateTime::parse_from_rfc3339(timestamp).is_err() {
                findings.push(Finding {
                    severity: Severity::Warning,
                    category: FindingCategory::DocumentMetadata,
                    message: format!("Timestamp '{timestamp}' is not RFC 3339"),
                    element: Some("metadata.timestamp".to_string()),
                });
            }
        }
    }

    fn check_licenses(bom: &Bom, findings: &mut Vec<Finding>) {
        let mut check = |choices: &Option<Vec<LicenseChoice>>, element: &str| {
            for choice in choices.iter().flatten() {
                if let LicenseChoice::Expression(expr) = choice {
                    if let Err(e) = spdx::Expression::parse_mode(expr, spdx::ParseMode::LAX) {
                        findings.push(Finding {
                            severity: Severity::Warning,
                            category: FindingCategory::LicenseInfo,
                            message: format!("Invalid SPDX expression '{expr}': {e}"),
                            element: Some(element.to_string()),
                        });
                    }
                }
            }
        };

        for_each_component(bom, &mut |component, path| check(&component.licenses, path));
        for_each_service(bom, &mut |service, path| check(&service.licenses, path));
    }
}

fn for_each_component(bom: &Bom, f: &mut dyn FnMut(&Component, &str)) {
    fn walk(component: &Component, path: String, f: &mut dyn FnMut(&Component, &str)) {
        f(component, &path);
        for (i, child) in component.components.iter().flatten().enumerate() {
            walk(child, format!("{path}.components[{i}]"), f);
        }
    }
    if let Some(component) = bom.metadata.as_ref().and_then(|m| m.component.as_ref()) {
        walk(component, "metadata.component".to_string(), f);
    }
    for (i, component) in bom.components.iter().flatten().enumerate() {
        walk(component, format!("components[{i}]"), f);
    }
}

fn for_each_service(bom: &Bom, f: &mut dyn FnMut(&Service, &str)) {
    fn walk(service: &Service, path: String, f: &mut dyn FnMut(&Service, &str)) {
        f(service, &path);
        for (i, child) in service.services.iter().flatten().enumerate() {
            walk(child, format!("{path}.services[{i}]"), f);
        }
    }
    for (i, service) in bom.services.iter().flatten().enumerate() {
        walk(service, format!("services[{i}]"), f);
    }
}
