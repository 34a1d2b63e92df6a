//! Recursive collapse of empty collections.
//!
//! Text encodings omit empty collections, while lenient decoders often
//! materialize them. Left alone, `Some(vec![])` would survive a decode and
//! make `decode(encode(x)) != x`. [`normalize`] rewrites every zero-length
//! collection in the tree to `None` and keeps every other collection in its
//! original order, with each element normalized in turn.
//!
//! Only collections are touched. An optional struct whose fields are all
//! unset stays present, and scalar fields are never rewritten.

use crate::model::v1_2::{
    Bom, Component, DataClassification, Dependency, Issue, Metadata, OrganizationalContact,
    OrganizationalEntity, Patch, Pedigree, Service, Tool,
};
use crate::model::{Commit, ExternalReference, Hash, LicenseChoice};

/// A value tree that can have its empty collections collapsed.
///
/// Implementations must be idempotent.
pub trait Normalize: Sized {
    #[must_use]
    fn normalize(self) -> Self;
}

/// Normalize a document of the newest revision.
#[must_use]
pub fn normalize(bom: Bom) -> Bom {
    bom.normalize()
}

/// Whether `bom` is already in normalized form.
#[must_use]
pub fn is_normalized(bom: &Bom) -> bool {
    bom.clone().normalize() == *bom
}

/// `None` for an absent or empty list, otherwise every element normalized.
pub fn prune<T: Normalize>(items: Option<Vec<T>>) -> Option<Vec<T>> {
    match items {
        Some(items) if !items.is_empty() => {
            Some(items.into_iter().map(Normalize::normalize).collect())
        }
        _ => None,
    }
}

// Leaves hold no collections.

impl Normalize for String {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for Hash {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for Commit {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for ExternalReference {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for LicenseChoice {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for OrganizationalContact {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for DataClassification {
    fn normalize(self) -> Self {
        self
    }
}

impl Normalize for Bom {
    fn normalize(self) -> Self {
        Self {
            serial_number: self.serial_number,
            version: self.version,
            metadata: self.metadata.map(Normalize::normalize),
            components: prune(self.components),
            services: prune(self.services),
            external_references: prune(self.external_references),
            dependencies: prune(self.dependencies),
        }
    }
}

impl Normalize for Metadata {
    fn normalize(self) -> Self {
        Self {
            timestamp: self.timestamp,
            tools: prune(self.tools),
            authors: prune(self.authors),
            component: self.component.map(Normalize::normalize),
            manufacture: self.manufacture.map(Normalize::normalize),
            supplier: self.supplier.map(Normalize::normalize),
        }
    }
}

impl Normalize for Tool {
    fn normalize(self) -> Self {
        Self {
            hashes: prune(self.hashes),
            ..self
        }
    }
}

impl Normalize for OrganizationalEntity {
    fn normalize(self) -> Self {
        Self {
            name: self.name,
            url: prune(self.url),
            contact: prune(self.contact),
        }
    }
}

impl Normalize for Component {
    fn normalize(self) -> Self {
        Self {
            supplier: self.supplier.map(Normalize::normalize),
            hashes: prune(self.hashes),
            licenses: prune(self.licenses),
            pedigree: self.pedigree.map(Normalize::normalize),
            external_references: prune(self.external_references),
            components: prune(self.components),
            ..self
        }
    }
}

impl Normalize for Pedigree {
    fn normalize(self) -> Self {
        Self {
            ancestors: prune(self.ancestors),
            descendants: prune(self.descendants),
            variants: prune(self.variants),
            commits: prune(self.commits),
            patches: prune(self.patches),
            notes: self.notes,
        }
    }
}

impl Normalize for Patch {
    fn normalize(self) -> Self {
        Self {
            patch_type: self.patch_type,
            diff: self.diff,
            resolves: prune(self.resolves),
        }
    }
}

impl Normalize for Issue {
    fn normalize(self) -> Self {
        Self {
            references: prune(self.references),
            ..self
        }
    }
}

impl Normalize for Service {
    fn normalize(self) -> Self {
        Self {
            provider: self.provider.map(Normalize::normalize),
            endpoints: prune(self.endpoints),
            data: prune(self.data),
            licenses: prune(self.licenses),
            external_references: prune(self.external_references),
            services: prune(self.services),
            ..self
        }
    }
}

impl Normalize for Dependency {
    fn normalize(self) -> Self {
        Self {
            dependency_ref: self.dependency_ref,
            depends_on: prune(self.depends_on),
        }
    }
}
