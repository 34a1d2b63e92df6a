//! Schema version identifiers and the version-tagged document union.

use super::{v1_0, v1_1, v1_2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format identifier carried by every CycloneDX document.
pub const BOM_FORMAT: &str = "CycloneDX";

/// CycloneDX schema revision.
///
/// Variants are declared oldest first, so the derived ordering is the
/// schema's own: `V1_0 < V1_1 < V1_2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum SchemaVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
}

impl SchemaVersion {
    /// Newest supported revision; every load ends here.
    pub const LATEST: Self = Self::V1_2;

    /// All supported revisions, newest first.
    pub const NEWEST_FIRST: [Self; 3] = [Self::V1_2, Self::V1_1, Self::V1_0];

    /// Version string as written in `specVersion`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
        }
    }

    /// Default XML namespace of the `bom` root element.
    #[must_use]
    pub const fn xml_namespace(&self) -> &'static str {
        match self {
            Self::V1_0 => "http://cyclonedx.org/schema/bom/1.0",
            Self::V1_1 => "http://cyclonedx.org/schema/bom/1.1",
            Self::V1_2 => "http://cyclonedx.org/schema/bom/1.2",
        }
    }

    /// The revision directly after this one, if any.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::V1_0 => Some(Self::V1_1),
            Self::V1_1 => Some(Self::V1_2),
            Self::V1_2 => None,
        }
    }

    /// Number of upgrade steps needed to reach [`SchemaVersion::LATEST`].
    #[must_use]
    pub const fn steps_to_latest(&self) -> usize {
        match self {
            Self::V1_0 => 2,
            Self::V1_1 => 1,
            Self::V1_2 => 0,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(Self::V1_0),
            "1.1" => Ok(Self::V1_1),
            "1.2" => Ok(Self::V1_2),
            other => Err(format!(
                "unsupported CycloneDX version '{other}' (supported: 1.0, 1.1, 1.2)"
            )),
        }
    }
}

/// Implemented by the root document type of each schema revision.
pub trait SchemaModel: Sized {
    /// Revision this document type belongs to.
    const VERSION: SchemaVersion;

    /// Wrap the document in the version-tagged union.
    fn into_versioned(self) -> VersionedBom;
}

impl SchemaModel for v1_0::Bom {
    const VERSION: SchemaVersion = SchemaVersion::V1_0;

    fn into_versioned(self) -> VersionedBom {
        VersionedBom::V1_0(self)
    }
}

impl SchemaModel for v1_1::Bom {
    const VERSION: SchemaVersion = SchemaVersion::V1_1;

    fn into_versioned(self) -> VersionedBom {
        VersionedBom::V1_1(self)
    }
}

impl SchemaModel for v1_2::Bom {
    const VERSION: SchemaVersion = SchemaVersion::V1_2;

    fn into_versioned(self) -> VersionedBom {
        VersionedBom::V1_2(self)
    }
}

/// A decoded document tagged with the revision it was decoded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedBom {
    V1_0(v1_0::Bom),
    V1_1(v1_1::Bom),
    V1_2(v1_2::Bom),
}

impl VersionedBom {
    /// Revision of the wrapped document.
    #[must_use]
    pub const fn version(&self) -> SchemaVersion {
        match self {
            Self::V1_0(_) => SchemaVersion::V1_0,
            Self::V1_1(_) => SchemaVersion::V1_1,
            Self::V1_2(_) => SchemaVersion::V1_2,
        }
    }

    /// Number of top-level components, regardless of revision.
    #[must_use]
    pub fn component_count(&self) -> usize {
        match self {
            Self::V1_0(bom) => bom.components.as_ref().map_or(0, Vec::len),
            Self::V1_1(bom) => bom.components.as_ref().map_or(0, Vec::len),
            Self::V1_2(bom) => bom.components.as_ref().map_or(0, Vec::len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(SchemaVersion::V1_0 < SchemaVersion::V1_1);
        assert!(SchemaVersion::V1_1 < SchemaVersion::V1_2);
        assert_eq!(
            SchemaVersion::NEWEST_FIRST.iter().max(),
            Some(&SchemaVersion::LATEST)
        );
    }

    #[test]
    fn test_next_walks_to_latest() {
        let mut version = SchemaVersion::V1_0;
        let mut steps = 0;
        while let Some(next) = version.next() {
            version = next;
            steps += 1;
        }
        assert_eq!(version, SchemaVersion::LATEST);
        assert_eq!(steps, SchemaVersion::V1_0.steps_to_latest());
    }

    #[test]
    fn test_parse_and_display() {
        for version in SchemaVersion::NEWEST_FIRST {
            let parsed: SchemaVersion = version.as_str().parse().unwrap();
            assert_eq!(parsed, version);
            assert_eq!(parsed.to_string(), version.as_str());
        }
        assert!("1.3".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_namespaces_are_distinct() {
        assert_ne!(
            SchemaVersion::V1_1.xml_namespace(),
            SchemaVersion::V1_2.xml_namespace()
        );
        assert!(SchemaVersion::V1_0.xml_namespace().ends_with("/1.0"));
    }
}
