//! XML shapes of the leaves shared by every revision.
//!
//! XML wraps collections in a container element (`<hashes><hash/></hashes>`)
//! and moves some scalars into attributes, so these mirror the types in
//! [`crate::model::common`] rather than reusing them.

use crate::model::{
    AttachedText, Commit, ExternalReference, ExternalReferenceType, Hash, HashAlgorithm, License,
    LicenseChoice,
};
use serde::{Deserialize, Serialize};

/// Convert every element of an optional list.
pub(super) fn map_list<M, D>(items: &Option<Vec<M>>, f: impl Fn(&M) -> D) -> Option<Vec<D>> {
    items.as_ref().map(|items| items.iter().map(f).collect())
}

/// Repeated elements without a container cannot express an empty list.
pub(super) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlAttachedText {
    #[serde(rename = "@content-type", skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(rename = "@encoding", skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    #[serde(rename = "$text", default)]
    content: String,
}

impl From<&AttachedText> for XmlAttachedText {
    fn from(text: &AttachedText) -> Self {
        Self {
            content_type: text.content_type.clone(),
            encoding: text.encoding.clone(),
            content: text.content.clone(),
        }
    }
}

impl From<XmlAttachedText> for AttachedText {
    fn from(text: XmlAttachedText) -> Self {
        Self {
            content_type: text.content_type,
            encoding: text.encoding,
            content: text.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlHash {
    #[serde(rename = "@alg")]
    alg: HashAlgorithm,
    #[serde(rename = "$text", default)]
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlHashes {
    #[serde(rename = "hash", default)]
    hash: Vec<XmlHash>,
}

impl XmlHashes {
    pub(super) fn wrap(hashes: &Option<Vec<Hash>>) -> Option<Self> {
        map_list(hashes, |h| XmlHash {
            alg: h.alg,
            content: h.content.clone(),
        })
        .map(|hash| Self { hash })
    }

    pub(super) fn into_items(self) -> Vec<Hash> {
        self.hash
            .into_iter()
            .map(|h| Hash::new(h.alg, h.content))
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlLicense {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<XmlAttachedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

/// `<license>` or `<expression>` inside `<licenses>`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum XmlLicenseChoice {
    License(XmlLicense),
    Expression(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlLicenses {
    #[serde(rename = "$value", default)]
    choices: Vec<XmlLicenseChoice>,
}

impl XmlLicenses {
    pub(super) fn wrap(licenses: &Option<Vec<LicenseChoice>>) -> Option<Self> {
        map_list(licenses, |choice| match choice {
            LicenseChoice::License(license) => XmlLicenseChoice::License(XmlLicense {
                id: license.id.clone(),
                name: license.name.clone(),
                text: license.text.as_ref().map(XmlAttachedText::from),
                url: license.url.clone(),
            }),
            LicenseChoice::Expression(expr) => XmlLicenseChoice::Expression(expr.clone()),
        })
        .map(|choices| Self { choices })
    }

    pub(super) fn into_items(self) -> Vec<LicenseChoice> {
        self.choices
            .into_iter()
            .map(|choice| match choice {
                XmlLicenseChoice::License(license) => LicenseChoice::License(License {
                    id: license.id,
                    name: license.name,
                    text: license.text.map(AttachedText::from),
                    url: license.url,
                }),
                XmlLicenseChoice::Expression(expr) => LicenseChoice::Expression(expr),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlExternalReference {
    #[serde(rename = "@type")]
    ref_type: ExternalReferenceType,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlExternalReferences {
    #[serde(rename = "reference", default)]
    reference: Vec<XmlExternalReference>,
}

impl XmlExternalReferences {
    pub(super) fn wrap(refs: &Option<Vec<ExternalReference>>) -> Option<Self> {
        map_list(refs, |r| XmlExternalReference {
            ref_type: r.ref_type,
            url: r.url.clone(),
            comment: r.comment.clone(),
        })
        .map(|reference| Self { reference })
    }

    pub(super) fn into_items(self) -> Vec<ExternalReference> {
        self.reference
            .into_iter()
            .map(|r| ExternalReference {
                ref_type: r.ref_type,
                url: r.url,
                comment: r.comment,
            })
            .collect()
    }
}

/// Commits only have child elements, so the model type maps directly.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct XmlCommits {
    #[serde(rename = "commit", default)]
    commit: Vec<Commit>,
}

impl XmlCommits {
    pub(super) fn wrap(commits: &Option<Vec<Commit>>) -> Option<Self> {
        commits.clone().map(|commit| Self { commit })
    }

    pub(super) fn into_items(self) -> Vec<Commit> {
        self.commit
    }
}
