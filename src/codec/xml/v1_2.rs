//! XML shape of 1.2 documents.

use super::common::{
    non_empty, XmlAttachedText, XmlCommits, XmlExternalReferences, XmlHashes, XmlLicenses,
};
use crate::model::v1_2::{
    Bom, Component, DataClassification, DataFlow, Dependency, Diff, Issue, IssueClassification,
    Metadata, OrganizationalContact, OrganizationalEntity, Patch, PatchClassification, Pedigree,
    Service, Source, Swid, Tool,
};
use crate::model::{AttachedText, ComponentScope, ComponentType, SchemaVersion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "bom")]
pub struct Document {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<String>,
    #[serde(rename = "@serialNumber", skip_serializing_if = "Option::is_none")]
    serial_number: Option<String>,
    #[serde(rename = "@version", skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<XmlMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<XmlComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<XmlServices>,
    #[serde(rename = "externalReferences", skip_serializing_if = "Option::is_none")]
    external_references: Option<XmlExternalReferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<XmlDependencies>,
}

// =============================================================================
// Metadata
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct XmlMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<XmlTools>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authors: Option<XmlAuthors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<XmlComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manufacture: Option<XmlOrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<XmlOrganizationalEntity>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlTools {
    #[serde(rename = "tool", default)]
    tool: Vec<XmlTool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<XmlHashes>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlAuthors {
    #[serde(rename = "author", default)]
    author: Vec<OrganizationalContact>,
}

/// `url` and `contact` repeat directly under the entity element.
#[derive(Debug, Serialize, Deserialize)]
struct XmlOrganizationalEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "url", default, skip_serializing_if = "Vec::is_empty")]
    url: Vec<String>,
    #[serde(rename = "contact", default, skip_serializing_if = "Vec::is_empty")]
    contact: Vec<OrganizationalContact>,
}

impl From<&OrganizationalEntity> for XmlOrganizationalEntity {
    fn from(e: &OrganizationalEntity) -> Self {
        Self {
            name: e.name.clone(),
            url: e.url.clone().unwrap_or_default(),
            contact: e.contact.clone().unwrap_or_default(),
        }
    }
}

impl From<XmlOrganizationalEntity> for OrganizationalEntity {
    fn from(e: XmlOrganizationalEntity) -> Self {
        Self {
            name: e.name,
            url: non_empty(e.url),
            contact: non_empty(e.contact),
        }
    }
}

impl From<&Tool> for XmlTool {
    fn from(t: &Tool) -> Self {
        Self {
            vendor: t.vendor.clone(),
            name: t.name.clone(),
            version: t.version.clone(),
            hashes: XmlHashes::wrap(&t.hashes),
        }
    }
}

impl From<XmlTool> for Tool {
    fn from(t: XmlTool) -> Self {
        Self {
            vendor: t.vendor,
            name: t.name,
            version: t.version,
            hashes: t.hashes.map(XmlHashes::into_items),
        }
    }
}

impl From<&Metadata> for XmlMetadata {
    fn from(m: &Metadata) -> Self {
        Self {
            timestamp: m.timestamp.clone(),
            tools: m.tools.as_ref().map(|tools| XmlTools {
                tool: tools.iter().map(XmlTool::from).collect(),
            }),
            authors: m.authors.clone().map(|author| XmlAuthors { author }),
            component: m.component.as_ref().map(XmlComponent::from),
            manufacture: m.manufacture.as_ref().map(XmlOrganizationalEntity::from),
            supplier: m.supplier.as_ref().map(XmlOrganizationalEntity::from),
        }
    }
}

impl From<XmlMetadata> for Metadata {
    fn from(m: XmlMetadata) -> Self {
        Self {
            timestamp: m.timestamp,
            tools: m
                .tools
                .map(|tools| tools.tool.into_iter().map(Into::into).collect()),
            authors: m.authors.map(|authors| authors.author),
            component: m.component.map(Into::into),
            manufacture: m.manufacture.map(Into::into),
            supplier: m.supplier.map(Into::into),
        }
    }
}

// =============================================================================
// Components and pedigree
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct XmlComponents {
    #[serde(rename = "component", default)]
    component: Vec<XmlComponent>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct XmlComponent {
    #[serde(rename = "@type")]
    component_type: ComponentType,
    #[serde(rename = "@mime-type", skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(rename = "@bom-ref", skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<XmlOrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<ComponentScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<XmlHashes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<XmlLicenses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swid: Option<XmlSwid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pedigree: Option<XmlPedigree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_references: Option<XmlExternalReferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<XmlComponents>,
}

/// Tag identity lives in attributes, the tag body and location in children.
#[derive(Debug, Serialize, Deserialize)]
struct XmlSwid {
    #[serde(rename = "@tagId")]
    tag_id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@version", skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(rename = "@tagVersion", skip_serializing_if = "Option::is_none")]
    tag_version: Option<u32>,
    #[serde(rename = "@patch", skip_serializing_if = "Option::is_none")]
    patch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<XmlAttachedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<&Swid> for XmlSwid {
    fn from(s: &Swid) -> Self {
        Self {
            tag_id: s.tag_id.clone(),
            name: s.name.clone(),
            version: s.version.clone(),
            tag_version: s.tag_version,
            patch: s.patch,
            text: s.text.as_ref().map(XmlAttachedText::from),
            url: s.url.clone(),
        }
    }
}

impl From<XmlSwid> for Swid {
    fn from(s: XmlSwid) -> Self {
        Self {
            tag_id: s.tag_id,
            name: s.name,
            version: s.version,
            tag_version: s.tag_version,
            patch: s.patch,
            text: s.text.map(AttachedText::from),
            url: s.url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlPedigree {
    #[serde(skip_serializing_if = "Option::is_none")]
    ancestors: Option<XmlComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    descendants: Option<XmlComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variants: Option<XmlComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commits: Option<XmlCommits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patches: Option<XmlPatches>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlPatches {
    #[serde(rename = "patch", default)]
    patch: Vec<XmlPatch>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlPatch {
    #[serde(rename = "@type")]
    patch_type: PatchClassification,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<XmlDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolves: Option<XmlResolves>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<XmlAttachedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlResolves {
    #[serde(rename = "issue", default)]
    issue: Vec<XmlIssue>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlIssue {
    #[serde(rename = "@type")]
    issue_type: IssueClassification,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<XmlIssueReferences>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlIssueReferences {
    #[serde(rename = "url", default)]
    url: Vec<String>,
}

impl XmlComponents {
    fn wrap(components: &Option<Vec<Component>>) -> Option<Self> {
        components.as_ref().map(|items| Self {
            component: items.iter().map(XmlComponent::from).collect(),
        })
    }

    fn into_items(self) -> Vec<Component> {
        self.component.into_iter().map(Into::into).collect()
    }
}

impl From<&Issue> for XmlIssue {
    fn from(i: &Issue) -> Self {
        Self {
            issue_type: i.issue_type,
            id: i.id.clone(),
            name: i.name.clone(),
            description: i.description.clone(),
            source: i.source.clone(),
            references: i.references.clone().map(|url| XmlIssueReferences { url }),
        }
    }
}

impl From<XmlIssue> for Issue {
    fn from(i: XmlIssue) -> Self {
        Self {
            issue_type: i.issue_type,
            id: i.id,
            name: i.name,
            description: i.description,
            source: i.source,
            references: i.references.map(|refs| refs.url),
        }
    }
}

impl From<&Patch> for XmlPatch {
    fn from(p: &Patch) -> Self {
        Self {
            patch_type: p.patch_type,
            diff: p.diff.as_ref().map(|d| XmlDiff {
                text: d.text.as_ref().map(XmlAttachedText::from),
                url: d.url.clone(),
            }),
            resolves: p.resolves.as_ref().map(|issues| XmlResolves {
                issue: issues.iter().map(XmlIssue::from).collect(),
            }),
        }
    }
}

impl From<XmlPatch> for Patch {
    fn from(p: XmlPatch) -> Self {
        Self {
            patch_type: p.patch_type,
            diff: p.diff.map(|d| Diff {
                text: d.text.map(AttachedText::from),
                url: d.url,
            }),
            resolves: p
                .resolves
                .map(|resolves| resolves.issue.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<&Pedigree> for XmlPedigree {
    fn from(p: &Pedigree) -> Self {
        Self {
            ancestors: XmlComponents::wrap(&p.ancestors),
            descendants: XmlComponents::wrap(&p.descendants),
            variants: XmlComponents::wrap(&p.variants),
            commits: XmlCommits::wrap(&p.commits),
            patches: p.patches.as_ref().map(|patches| XmlPatches {
                patch: patches.iter().map(XmlPatch::from).collect(),
            }),
            notes: p.notes.clone(),
        }
    }
}

impl From<XmlPedigree> for Pedigree {
    fn from(p: XmlPedigree) -> Self {
        Self {
            ancestors: p.ancestors.map(XmlComponents::into_items),
            descendants: p.descendants.map(XmlComponents::into_items),
            variants: p.variants.map(XmlComponents::into_items),
            commits: p.commits.map(XmlCommits::into_items),
            patches: p
                .patches
                .map(|patches| patches.patch.into_iter().map(Into::into).collect()),
            notes: p.notes,
        }
    }
}

impl From<&Component> for XmlComponent {
    fn from(c: &Component) -> Self {
        Self {
            component_type: c.component_type,
            mime_type: c.mime_type.clone(),
            bom_ref: c.bom_ref.clone(),
            supplier: c.supplier.as_ref().map(XmlOrganizationalEntity::from),
            author: c.author.clone(),
            publisher: c.publisher.clone(),
            group: c.group.clone(),
            name: c.name.clone(),
            version: c.version.clone(),
            description: c.description.clone(),
            scope: c.scope,
            hashes: XmlHashes::wrap(&c.hashes),
            licenses: XmlLicenses::wrap(&c.licenses),
            copyright: c.copyright.clone(),
            cpe: c.cpe.clone(),
            purl: c.purl.clone(),
            swid: c.swid.as_ref().map(XmlSwid::from),
            modified: c.modified,
            pedigree: c.pedigree.as_ref().map(XmlPedigree::from),
            external_references: XmlExternalReferences::wrap(&c.external_references),
            components: XmlComponents::wrap(&c.components),
        }
    }
}

impl From<XmlComponent> for Component {
    fn from(c: XmlComponent) -> Self {
        Self {
            component_type: c.component_type,
            mime_type: c.mime_type,
            bom_ref: c.bom_ref,
            supplier: c.supplier.map(Into::into),
            author: c.author,
            publisher: c.publisher,
            group: c.group,
            name: c.name,
            version: c.version,
            description: c.description,
            scope: c.scope,
            hashes: c.hashes.map(XmlHashes::into_items),
            licenses: c.licenses.map(XmlLicenses::into_items),
            copyright: c.copyright,
            cpe: c.cpe,
            purl: c.purl,
            swid: c.swid.map(Into::into),
            modified: c.modified,
            pedigree: c.pedigree.map(Into::into),
            external_references: c.external_references.map(XmlExternalReferences::into_items),
            components: c.components.map(XmlComponents::into_items),
        }
    }
}

// =============================================================================
// Services
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct XmlServices {
    #[serde(rename = "service", default)]
    service: Vec<XmlService>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct XmlService {
    #[serde(rename = "@bom-ref", skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<XmlOrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoints: Option<XmlEndpoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authenticated: Option<bool>,
    #[serde(rename = "x-trust-boundary", skip_serializing_if = "Option::is_none")]
    x_trust_boundary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<XmlData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<XmlLicenses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_references: Option<XmlExternalReferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<XmlServices>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlEndpoints {
    #[serde(rename = "endpoint", default)]
    endpoint: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlData {
    #[serde(rename = "classification", default)]
    classification: Vec<XmlDataClassification>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlDataClassification {
    #[serde(rename = "@flow")]
    flow: DataFlow,
    #[serde(rename = "$text", default)]
    classification: String,
}

impl XmlServices {
    fn wrap(services: &Option<Vec<Service>>) -> Option<Self> {
        services.as_ref().map(|items| Self {
            service: items.iter().map(XmlService::from).collect(),
        })
    }

    fn into_items(self) -> Vec<Service> {
        self.service.into_iter().map(Into::into).collect()
    }
}

impl From<&Service> for XmlService {
    fn from(s: &Service) -> Self {
        Self {
            bom_ref: s.bom_ref.clone(),
            provider: s.provider.as_ref().map(XmlOrganizationalEntity::from),
            group: s.group.clone(),
            name: s.name.clone(),
            version: s.version.clone(),
            description: s.description.clone(),
            endpoints: s.endpoints.clone().map(|endpoint| XmlEndpoints { endpoint }),
            authenticated: s.authenticated,
            x_trust_boundary: s.x_trust_boundary,
            data: s.data.as_ref().map(|data| XmlData {
                classification: data
                    .iter()
                    .map(|d| XmlDataClassification {
                        flow: d.flow,
                        classification: d.classification.clone(),
                    })
                    .collect(),
            }),
            licenses: XmlLicenses::wrap(&s.licenses),
            external_references: XmlExternalReferences::wrap(&s.external_references),
            services: XmlServices::wrap(&s.services),
        }
    }
}

impl From<XmlService> for Service {
    fn from(s: XmlService) -> Self {
        Self {
            bom_ref: s.bom_ref,
            provider: s.provider.map(Into::into),
            group: s.group,
            name: s.name,
            version: s.version,
            description: s.description,
            endpoints: s.endpoints.map(|e| e.endpoint),
            authenticated: s.authenticated,
            x_trust_boundary: s.x_trust_boundary,
            data: s.data.map(|data| {
                data.classification
                    .into_iter()
                    .map(|d| DataClassification {
                        flow: d.flow,
                        classification: d.classification,
                    })
                    .collect()
            }),
            licenses: s.licenses.map(XmlLicenses::into_items),
            external_references: s.external_references.map(XmlExternalReferences::into_items),
            services: s.services.map(XmlServices::into_items),
        }
    }
}

// =============================================================================
// Dependency graph
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct XmlDependencies {
    #[serde(rename = "dependency", default)]
    dependency: Vec<XmlDependency>,
}

/// `<dependency ref="a"><dependency ref="b"/></dependency>`
#[derive(Debug, Serialize, Deserialize)]
struct XmlDependency {
    #[serde(rename = "@ref")]
    dependency_ref: String,
    #[serde(rename = "dependency", default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<XmlDependencyRef>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlDependencyRef {
    #[serde(rename = "@ref")]
    dependency_ref: String,
}

impl From<&Dependency> for XmlDependency {
    fn from(d: &Dependency) -> Self {
        Self {
            dependency_ref: d.dependency_ref.clone(),
            depends_on: d
                .depends_on
                .iter()
                .flatten()
                .map(|r| XmlDependencyRef {
                    dependency_ref: r.clone(),
                })
                .collect(),
        }
    }
}

impl From<XmlDependency> for Dependency {
    fn from(d: XmlDependency) -> Self {
        Self {
            dependency_ref: d.dependency_ref,
            depends_on: non_empty(
                d.depends_on
                    .into_iter()
                    .map(|r| r.dependency_ref)
                    .collect(),
            ),
        }
    }
}

// =============================================================================
// Root
// =============================================================================

impl From<&Bom> for Document {
    fn from(bom: &Bom) -> Self {
        Self {
            xmlns: Some(SchemaVersion::V1_2.xml_namespace().to_string()),
            serial_number: bom.serial_number.clone(),
            version: bom.version,
            metadata: bom.metadata.as_ref().map(XmlMetadata::from),
            components: XmlComponents::wrap(&bom.components),
            services: XmlServices::wrap(&bom.services),
            external_references: XmlExternalReferences::wrap(&bom.external_references),
            dependencies: bom.dependencies.as_ref().map(|deps| XmlDependencies {
                dependency: deps.iter().map(XmlDependency::from).collect(),
            }),
        }
    }
}

impl From<Document> for Bom {
    fn from(doc: Document) -> Self {
        Self {
            serial_number: doc.serial_number,
            version: doc.version,
            metadata: doc.metadata.map(Into::into),
            components: doc.components.map(XmlComponents::into_items),
            services: doc.services.map(XmlServices::into_items),
            external_references: doc.external_references.map(XmlExternalReferences::into_items),
            dependencies: doc
                .dependencies
                .map(|deps| deps.dependency.into_iter().map(Into::into).collect()),
        }
    }
}
