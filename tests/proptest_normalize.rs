//! Property-based tests for normalization.
//!
//! Generates newest-revision trees with a mix of absent, empty and populated
//! collections and checks that the normalized form is stable and survives a
//! trip through either encoding.

use proptest::prelude::*;
use sbom_migrate::model::v1_2::{
    Bom, Component, DataClassification, DataFlow, Dependency, Diff, Patch, PatchClassification,
    Pedigree, Service,
};
use sbom_migrate::model::{
    AttachedText, ComponentType, ExternalReference, ExternalReferenceType, Hash, HashAlgorithm,
    LicenseChoice,
};
use sbom_migrate::{is_normalized, load_str, normalize, save_as, Encoding};

/// Identifier-like text for names, refs and URL segments.
fn text() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.-]{0,10}"
}

/// Prose with padding, markup characters and line breaks around a visible core.
fn free_text() -> impl Strategy<Value = String> {
    (
        "[ \t\n]{0,3}",
        "[!-~]([ -~\n]{0,16}[!-~])?",
        "[ \t\n]{0,3}",
    )
        .prop_map(|(lead, core, trail)| format!("{lead}{core}{trail}"))
}

fn has_empty_array(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Array(items) => items.is_empty() || items.iter().any(has_empty_array),
        serde_json::Value::Object(fields) => fields.values().any(has_empty_array),
        _ => false,
    }
}

/// Absent, empty, or up to two elements.
fn opt_list<T, S>(element: S) -> impl Strategy<Value = Option<Vec<T>>>
where
    T: Clone + std::fmt::Debug,
    S: Strategy<Value = T>,
{
    prop_oneof![
        Just(None),
        Just(Some(Vec::new())),
        prop::collection::vec(element, 1..3).prop_map(Some),
    ]
}

fn hash() -> impl Strategy<Value = Hash> {
    (
        prop_oneof![Just(HashAlgorithm::Sha1), Just(HashAlgorithm::Sha256)],
        "[0-9a-f]{8,16}",
    )
        .prop_map(|(alg, content)| Hash::new(alg, content))
}

fn license() -> impl Strategy<Value = LicenseChoice> {
    prop_oneof![
        Just(LicenseChoice::spdx_id("MIT")),
        Just(LicenseChoice::Expression("Apache-2.0 OR MIT".to_string())),
    ]
}

fn external_reference() -> impl Strategy<Value = ExternalReference> {
    text().prop_map(|host| {
        ExternalReference::new(ExternalReferenceType::Website, format!("https://{host}"))
    })
}

fn patch() -> impl Strategy<Value = Patch> {
    (
        prop_oneof![
            Just(PatchClassification::Backport),
            Just(PatchClassification::CherryPick),
        ],
        proptest::option::of(free_text()),
    )
        .prop_map(|(patch_type, diff)| Patch {
            patch_type,
            diff: diff.map(|content| Diff {
                text: Some(AttachedText {
                    content_type: Some("text/x-diff".to_string()),
                    encoding: None,
                    content,
                }),
                url: None,
            }),
            resolves: None,
        })
}

fn pedigree() -> impl Strategy<Value = Pedigree> {
    (opt_list(patch()), proptest::option::of(free_text())).prop_map(|(patches, notes)| {
        Pedigree {
            patches,
            notes,
            ..Pedigree::default()
        }
    })
}

fn leaf_component() -> impl Strategy<Value = Component> {
    (
        prop_oneof![
            Just(ComponentType::Library),
            Just(ComponentType::Application),
            Just(ComponentType::Firmware),
        ],
        free_text(),
        proptest::option::of(text()),
        proptest::option::of(text()),
        proptest::option::of(free_text()),
        proptest::option::of(free_text()),
        opt_list(hash()),
        opt_list(license()),
        opt_list(external_reference()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(pedigree()),
    )
        .prop_map(
            |(
                component_type,
                name,
                version,
                bom_ref,
                description,
                copyright,
                hashes,
                licenses,
                refs,
                modified,
                pedigree,
            )| {
                Component {
                    version,
                    bom_ref,
                    description,
                    copyright,
                    hashes,
                    licenses,
                    external_references: refs,
                    modified,
                    pedigree,
                    ..Component::new(component_type, name)
                }
            },
        )
}

fn component() -> impl Strategy<Value = Component> {
    leaf_component().prop_recursive(3, 16, 3, |inner| {
        (leaf_component(), opt_list(inner)).prop_map(|(component, children)| Component {
            components: children,
            ..component
        })
    })
}

fn service() -> impl Strategy<Value = Service> {
    (
        text(),
        proptest::option::of(free_text()),
        opt_list(text().prop_map(|path| format!("https://api.example.com/{path}"))),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        opt_list(free_text().prop_map(|classification| DataClassification {
            flow: DataFlow::Inbound,
            classification,
        })),
    )
        .prop_map(
            |(name, description, endpoints, authenticated, x_trust_boundary, data)| Service {
                description,
                endpoints,
                authenticated,
                x_trust_boundary,
                data,
                ..Service::new(name)
            },
        )
}

fn dependency() -> impl Strategy<Value = Dependency> {
    (text(), opt_list(text())).prop_map(|(dependency_ref, depends_on)| Dependency {
        dependency_ref,
        depends_on,
    })
}

fn bom() -> impl Strategy<Value = Bom> {
    (
        proptest::option::of(1u32..100),
        opt_list(component()),
        opt_list(service()),
        opt_list(external_reference()),
        opt_list(dependency()),
    )
        .prop_map(
            |(version, components, services, external_references, dependencies)| Bom {
                version,
                components,
                services,
                external_references,
                dependencies,
                ..Bom::default()
            },
        )
}

proptest! {
    // Tree generation is the expensive part; 200 cases keeps the suite quick.
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn normalize_is_idempotent(bom in bom()) {
        let once = normalize(bom);
        prop_assert!(is_normalized(&once));
        prop_assert_eq!(normalize(once.clone()), once);
    }

    #[test]
    fn normalized_tree_has_no_empty_collections(bom in bom()) {
        let value = serde_json::to_value(normalize(bom)).unwrap();
        prop_assert!(!has_empty_array(&value), "empty collection survived: {}", value);
    }

    #[test]
    fn normalize_keeps_populated_top_level_order(bom in bom()) {
        let names = |bom: &Bom| -> Vec<String> {
            bom.components.iter().flatten().map(|c| c.name.clone()).collect()
        };
        let before = names(&bom);
        let after = names(&normalize(bom));
        prop_assert_eq!(before, after);
    }

    #[test]
    fn normalized_tree_survives_save_and_load(bom in bom(), pretty in any::<bool>()) {
        let bom = normalize(bom);
        for encoding in [Encoding::Json, Encoding::Xml] {
            let saved = save_as(&bom, encoding, pretty).unwrap();
            let loaded = load_str(&saved).unwrap();
            prop_assert_eq!(&loaded.bom, &bom, "{} output:\n{}", encoding, saved);
        }
    }
}
