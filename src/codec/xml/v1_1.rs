//! XML shape of 1.1 documents.

use super::common::{XmlCommits, XmlExternalReferences, XmlHashes, XmlLicenses};
use crate::model::{v1_1, ComponentScope, ComponentType, SchemaVersion};
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
    components: Option<XmlComponents>,
    #[serde(rename = "externalReferences", skip_serializing_if = "Option::is_none")]
    external_references: Option<XmlExternalReferences>,
}

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
    #[serde(rename = "@bom-ref", skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
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
    modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pedigree: Option<XmlPedigree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_references: Option<XmlExternalReferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<XmlComponents>,
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
    notes: Option<String>,
}

impl XmlComponents {
    fn wrap(components: &Option<Vec<v1_1::Component>>) -> Option<Self> {
        components.as_ref().map(|items| Self {
            component: items.iter().map(XmlComponent::from).collect(),
        })
    }

    fn into_items(self) -> Vec<v1_1::Component> {
        self.component.into_iter().map(Into::into).collect()
    }
}

impl From<&v1_1::Pedigree> for XmlPedigree {
    fn from(p: &v1_1::Pedigree) -> Self {
        Self {
            ancestors: XmlComponents::wrap(&p.ancestors),
            descendants: XmlComponents::wrap(&p.descendants),
            variants: XmlComponents::wrap(&p.variants),
            commits: XmlCommits::wrap(&p.commits),
            notes: p.notes.clone(),
        }
    }
}

impl From<XmlPedigree> for v1_1::Pedigree {
    fn from(p: XmlPedigree) -> Self {
        Self {
            ancestors: p.ancestors.map(XmlComponents::into_items),
            descendants: p.descendants.map(XmlComponents::into_items),
            variants: p.variants.map(XmlComponents::into_items),
            commits: p.commits.map(XmlCommits::into_items),
            notes: p.notes,
        }
    }
}

impl From<&v1_1::Component> for XmlComponent {
    fn from(c: &v1_1::Component) -> Self {
        Self {
            component_type: c.component_type,
            bom_ref: c.bom_ref.clone(),
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
            modified: c.modified,
            pedigree: c.pedigree.as_ref().map(XmlPedigree::from),
            external_references: XmlExternalReferences::wrap(&c.external_references),
            components: XmlComponents::wrap(&c.components),
        }
    }
}

impl From<XmlComponent> for v1_1::Component {
    fn from(c: XmlComponent) -> Self {
        Self {
            component_type: c.component_type,
            bom_ref: c.bom_ref,
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
            modified: c.modified,
            pedigree: c.pedigree.map(Into::into),
            external_references: c.external_references.map(XmlExternalReferences::into_items),
            components: c.components.map(XmlComponents::into_items),
        }
    }
}

impl From<&v1_1::Bom> for Document {
    fn from(bom: &v1_1::Bom) -> Self {
        Self {
            xmlns: Some(SchemaVersion::V1_1.xml_namespace().to_string()),
            serial_number: bom.serial_number.clone(),
            version: bom.version,
            components: XmlComponents::wrap(&bom.components),
            external_references: XmlExternalReferences::wrap(&bom.external_references),
        }
    }
}

impl From<Document> for v1_1::Bom {
    fn from(doc: Document) -> Self {
        Self {
            serial_number: doc.serial_number,
            version: doc.version,
            components: doc.components.map(XmlComponents::into_items),
            external_references: doc.external_references.map(XmlExternalReferences::into_items),
        }
    }
}
