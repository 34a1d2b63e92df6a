//! XML shape of 1.0 documents.

use super::common::{XmlHashes, XmlLicenses};
use crate::model::{v1_0, ComponentScope, ComponentType, SchemaVersion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "bom")]
pub struct Document {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<String>,
    #[serde(rename = "@version", skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<XmlComponents>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlComponents {
    #[serde(rename = "component", default)]
    component: Vec<XmlComponent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlComponent {
    #[serde(rename = "@type")]
    component_type: ComponentType,
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
    components: Option<XmlComponents>,
}

impl XmlComponents {
    fn wrap(components: &Option<Vec<v1_0::Component>>) -> Option<Self> {
        components.as_ref().map(|items| Self {
            component: items.iter().map(XmlComponent::from).collect(),
        })
    }

    fn into_items(self) -> Vec<v1_0::Component> {
        self.component.into_iter().map(Into::into).collect()
    }
}

impl From<&v1_0::Component> for XmlComponent {
    fn from(c: &v1_0::Component) -> Self {
        Self {
            component_type: c.component_type,
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
            components: XmlComponents::wrap(&c.components),
        }
    }
}

impl From<XmlComponent> for v1_0::Component {
    fn from(c: XmlComponent) -> Self {
        Self {
            component_type: c.component_type,
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
            components: c.components.map(XmlComponents::into_items),
        }
    }
}

impl From<&v1_0::Bom> for Document {
    fn from(bom: &v1_0::Bom) -> Self {
        Self {
            xmlns: Some(SchemaVersion::V1_0.xml_namespace().to_string()),
            version: bom.version,
            components: XmlComponents::wrap(&bom.components),
        }
    }
}

impl From<Document> for v1_0::Bom {
    fn from(doc: Document) -> Self {
        Self {
            version: doc.version,
            components: doc.components.map(XmlComponents::into_items),
        }
    }
}
