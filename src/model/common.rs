//! Entities whose value space is the same in every supported schema revision.
//!
//! The version-specific trees in [`super::v1_0`], [`super::v1_1`] and
//! [`super::v1_2`] share these leaves, so upgrading them is a plain move.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Component classification.
///
/// `container`, `firmware` and `file` only appear in later revisions; older
/// documents simply never use them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Container => "container",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::Firmware => "firmware",
            Self::File => "file",
        };
        f.write_str(s)
    }
}

/// Whether a component is required at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentScope {
    Required,
    Optional,
    Excluded,
}

/// Digest algorithm of a [`Hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    #[serde(rename = "SHA3-512")]
    Sha3_512,
    #[serde(rename = "BLAKE2b-256")]
    Blake2b256,
    #[serde(rename = "BLAKE2b-384")]
    Blake2b384,
    #[serde(rename = "BLAKE2b-512")]
    Blake2b512,
    #[serde(rename = "BLAKE3")]
    Blake3,
}

/// A digest of a referenced artifact. The content is carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash {
    pub alg: HashAlgorithm,
    pub content: String,
}

impl Hash {
    #[must_use]
    pub fn new(alg: HashAlgorithm, content: impl Into<String>) -> Self {
        Self {
            alg,
            content: content.into(),
        }
    }
}

/// Inline text, optionally base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    pub content: String,
}

/// A single license, identified by SPDX id or free-form name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<AttachedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Either a license or an SPDX license expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseChoice {
    License(License),
    Expression(String),
}

impl LicenseChoice {
    /// License choice naming an SPDX license id.
    #[must_use]
    pub fn spdx_id(id: impl Into<String>) -> Self {
        Self::License(License {
            id: Some(id.into()),
            ..License::default()
        })
    }
}

/// Kind of an [`ExternalReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalReferenceType {
    Vcs,
    IssueTracker,
    Website,
    Advisories,
    Bom,
    MailingList,
    Social,
    Chat,
    Documentation,
    Support,
    Distribution,
    License,
    BuildMeta,
    BuildSystem,
    Other,
}

/// Pointer to a resource outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    #[serde(rename = "type")]
    pub ref_type: ExternalReferenceType,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ExternalReference {
    #[must_use]
    pub fn new(ref_type: ExternalReferenceType, url: impl Into<String>) -> Self {
        Self {
            ref_type,
            url: url.into(),
            comment: None,
        }
    }
}

/// Who did something, and when. Timestamps are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiableAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A source-control commit in a component's pedigree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<IdentifiableAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<IdentifiableAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_names() {
        let hash = Hash::new(HashAlgorithm::Sha3_256, "abc");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, r#"{"alg":"SHA3-256","content":"abc"}"#);
    }

    #[test]
    fn test_license_choice_shape() {
        let id = serde_json::to_string(&LicenseChoice::spdx_id("MIT")).unwrap();
        assert_eq!(id, r#"{"license":{"id":"MIT"}}"#);

        let expr: LicenseChoice =
            serde_json::from_str(r#"{"expression":"MIT OR Apache-2.0"}"#).unwrap();
        assert_eq!(expr, LicenseChoice::Expression("MIT OR Apache-2.0".into()));
    }

    #[test]
    fn test_kebab_case_enums() {
        assert_eq!(
            serde_json::to_string(&ComponentType::OperatingSystem).unwrap(),
            r#""operating-system""#
        );
        assert_eq!(
            serde_json::to_string(&ExternalReferenceType::IssueTracker).unwrap(),
            r#""issue-tracker""#
        );
        assert_eq!(ComponentType::OperatingSystem.to_string(), "operating-system");
    }
}
