//! Structural upgrades between adjacent schema revisions.
//!
//! Each step moves every field the older revision has into the same field of
//! the newer one and leaves fields the older revision lacks unset. Steps never
//! reorder collections and never drop or prune anything; an empty collection
//! stays an empty collection until [`crate::normalize`] runs.

use crate::model::{v1_0, v1_1, v1_2, VersionedBom};

/// Upgrade a 1.0 document to 1.1.
#[must_use]
pub fn upgrade_v1_0(bom: v1_0::Bom) -> v1_1::Bom {
    tracing::debug!(
        components = bom.components.as_ref().map_or(0, Vec::len),
        "Upgrading document from 1.0 to 1.1"
    );
    v1_1::Bom {
        serial_number: None,
        version: bom.version,
        components: upgrade_list(bom.components, component_v1_0),
        external_references: None,
    }
}

/// Upgrade a 1.1 document to 1.2.
#[must_use]
pub fn upgrade_v1_1(bom: v1_1::Bom) -> v1_2::Bom {
    tracing::debug!(
        components = bom.components.as_ref().map_or(0, Vec::len),
        "Upgrading document from 1.1 to 1.2"
    );
    v1_2::Bom {
        serial_number: bom.serial_number,
        version: bom.version,
        metadata: None,
        components: upgrade_list(bom.components, component_v1_1),
        services: None,
        external_references: bom.external_references,
        dependencies: None,
    }
}

/// Apply every remaining step to reach the newest revision.
#[must_use]
pub fn upgrade_to_latest(bom: VersionedBom) -> v1_2::Bom {
    match bom {
        VersionedBom::V1_0(bom) => upgrade_v1_1(upgrade_v1_0(bom)),
        VersionedBom::V1_1(bom) => upgrade_v1_1(bom),
        VersionedBom::V1_2(bom) => bom,
    }
}

fn upgrade_list<T, U>(items: Option<Vec<T>>, step: fn(T) -> U) -> Option<Vec<U>> {
    items.map(|items| items.into_iter().map(step).collect())
}

fn component_v1_0(c: v1_0::Component) -> v1_1::Component {
    v1_1::Component {
        component_type: c.component_type,
        bom_ref: None,
        publisher: c.publisher,
        group: c.group,
        name: c.name,
        version: c.version,
        description: c.description,
        scope: c.scope,
        hashes: c.hashes,
        licenses: c.licenses,
        copyright: c.copyright,
        cpe: c.cpe,
        purl: c.purl,
        modified: c.modified,
        pedigree: None,
        external_references: None,
        components: upgrade_list(c.components, component_v1_0),
    }
}

fn component_v1_1(c: v1_1::Component) -> v1_2::Component {
    v1_2::Component {
        component_type: c.component_type,
        mime_type: None,
        bom_ref: c.bom_ref,
        supplier: None,
        author: None,
        publisher: c.publisher,
        group: c.group,
        name: c.name,
        version: c.version,
        description: c.description,
        scope: c.scope,
        hashes: c.hashes,
        licenses: c.licenses,
        copyright: c.copyright,
        cpe: c.cpe,
        purl: c.purl,
        swid: None,
        modified: c.modified,
        pedigree: c.pedigree.map(pedigree_v1_1),
        external_references: c.external_references,
        components: upgrade_list(c.components, component_v1_1),
    }
}

fn pedigree_v1_1(p: v1_1::Pedigree) -> v1_2::Pedigree {
    v1_2::Pedigree {
        ancestors: upgrade_list(p.ancestors, component_v1_1),
        descendants: upgrade_list(p.descendants, component_v1_1),
        variants: upgrade_list(p.variants, component_v1_1),
        commits: p.commits,
        patches: None,
        notes: p.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Commit, ComponentScope, ComponentType, ExternalReference, ExternalReferenceType, Hash,
        HashAlgorithm, LicenseChoice,
    };

    fn sample_v1_0() -> v1_0::Bom {
        let mut child = v1_0::Component::new(ComponentType::Library, "child");
        child.version = Some("0.1".into());

        let mut parent = v1_0::Component::new(ComponentType::Application, "parent");
        parent.version = Some("2.0".into());
        parent.scope = Some(ComponentScope::Required);
        parent.hashes = Some(vec![Hash::new(HashAlgorithm::Sha1, "deadbeef")]);
        parent.licenses = Some(vec![LicenseChoice::spdx_id("Apache-2.0")]);
        parent.modified = Some(false);
        parent.components = Some(vec![child]);

        v1_0::Bom {
            version: Some(7),
            components: Some(vec![
                parent,
                v1_0::Component::new(ComponentType::Device, "second"),
            ]),
        }
    }

    #[test]
    fn test_v1_0_fields_carry_over() {
        let upgraded = upgrade_v1_0(sample_v1_0());
        assert_eq!(upgraded.version, Some(7));
        assert_eq!(upgraded.serial_number, None);
        assert_eq!(upgraded.external_references, None);

        let components = upgraded.components.unwrap();
        assert_eq!(components[0].name, "parent");
        assert_eq!(components[1].name, "second");
        assert_eq!(components[0].scope, Some(ComponentScope::Required));
        assert_eq!(components[0].modified, Some(false));
        assert_eq!(components[0].bom_ref, None);
        assert_eq!(components[0].pedigree, None);

        let nested = components[0].components.as_ref().unwrap();
        assert_eq!(nested[0].name, "child");
        assert_eq!(nested[0].version.as_deref(), Some("0.1"));
    }

    #[test]
    fn test_v1_1_fields_carry_over() {
        let mut ancestor = v1_1::Component::new(ComponentType::Library, "upstream");
        ancestor.bom_ref = Some("upstream".into());

        let mut component = v1_1::Component::new(ComponentType::Library, "fork");
        component.bom_ref = Some("fork".into());
        component.pedigree = Some(v1_1::Pedigree {
            ancestors: Some(vec![ancestor]),
            commits: Some(vec![Commit {
                uid: Some("abc".into()),
                ..Commit::default()
            }]),
            notes: Some("patched locally".into()),
            ..v1_1::Pedigree::default()
        });

        let bom = v1_1::Bom {
            serial_number: Some("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".into()),
            version: Some(1),
            components: Some(vec![component]),
            external_references: Some(vec![ExternalReference::new(
                ExternalReferenceType::Website,
                "https://example.com",
            )]),
        };

        let upgraded = upgrade_v1_1(bom.clone());
        assert_eq!(upgraded.serial_number, bom.serial_number);
        assert_eq!(upgraded.external_references, bom.external_references);
        assert_eq!(upgraded.metadata, None);
        assert_eq!(upgraded.services, None);
        assert_eq!(upgraded.dependencies, None);

        let component = &upgraded.components.as_ref().unwrap()[0];
        assert_eq!(component.bom_ref.as_deref(), Some("fork"));
        assert_eq!(component.supplier, None);
        assert_eq!(component.author, None);
        assert_eq!(component.swid, None);
        let pedigree = component.pedigree.as_ref().unwrap();
        assert_eq!(pedigree.patches, None);
        assert_eq!(pedigree.notes.as_deref(), Some("patched locally"));
        assert_eq!(
            pedigree.ancestors.as_ref().unwrap()[0].bom_ref.as_deref(),
            Some("upstream")
        );
    }

    #[test]
    fn test_empty_collections_are_preserved() {
        let bom = v1_0::Bom {
            version: None,
            components: Some(vec![]),
        };
        let upgraded = upgrade_v1_0(bom);
        assert_eq!(upgraded.components, Some(vec![]));

        let bom = upgrade_v1_1(v1_1::Bom {
            external_references: Some(vec![]),
            ..v1_1::Bom::default()
        });
        assert_eq!(bom.external_references, Some(vec![]));
    }

    #[test]
    fn test_to_latest_composes_steps() {
        let direct = upgrade_v1_1(upgrade_v1_0(sample_v1_0()));
        let chained = upgrade_to_latest(VersionedBom::V1_0(sample_v1_0()));
        assert_eq!(direct, chained);

        let latest = v1_2::Bom {
            version: Some(3),
            ..v1_2::Bom::default()
        };
        assert_eq!(upgrade_to_latest(VersionedBom::V1_2(latest.clone())), latest);
    }

    #[test]
    fn test_each_step_logs_at_debug() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let upgraded = tracing::subscriber::with_default(subscriber, || {
            upgrade_to_latest(VersionedBom::V1_0(sample_v1_0()))
        });
        assert_eq!(upgraded.components.as_ref().map(Vec::len), Some(2));

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("from 1.0 to 1.1"), "{output}");
        assert!(output.contains("from 1.1 to 1.2"), "{output}");
        assert!(output.contains("components=2"), "{output}");
    }
}
