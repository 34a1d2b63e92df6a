use sbom_migrate::config::DetectionConfig;
use sbom_migrate::model::v1_2::{DataFlow, IssueClassification, PatchClassification};
use sbom_migrate::model::{ComponentType, ExternalReferenceType, HashAlgorithm, LicenseChoice};
use sbom_migrate::{load_file, load_str, save_as, Encoding, SchemaVersion};
use std::path::Path;

fn load_fixture(path: &str) -> sbom_migrate::LoadedBom {
    load_file(Path::new(path), &DetectionConfig::default())
        .unwrap_or_else(|e| panic!("failed to load {path}: {e}"))
}

#[test]
fn golden_v1_0_minimal_xml() {
    let loaded = load_fixture("tests/fixtures/v1_0/minimal.xml");

    assert_eq!(loaded.source_version, SchemaVersion::V1_0);
    assert_eq!(loaded.source_encoding, Encoding::Xml);
    assert_eq!(loaded.upgrade_steps(), 2);

    let bom = &loaded.bom;
    assert_eq!(bom.version, Some(1));
    // Fields introduced after 1.0 stay absent
    assert_eq!(bom.serial_number, None);
    assert_eq!(bom.metadata, None);
    assert_eq!(bom.services, None);
    assert_eq!(bom.external_references, None);
    assert_eq!(bom.dependencies, None);

    let components = bom.components.as_ref().expect("components");
    assert_eq!(components.len(), 1);
    let component = &components[0];
    assert_eq!(component.name, "tomcat-catalina");
    assert_eq!(component.component_type, ComponentType::Library);
    assert_eq!(component.bom_ref, None);
    assert_eq!(component.supplier, None);
    assert_eq!(component.author, None);
    assert_eq!(component.mime_type, None);
    assert_eq!(component.pedigree, None);
    assert_eq!(component.modified, None);
}

#[test]
fn golden_v1_0_minimal_json() {
    let loaded = load_fixture("tests/fixtures/v1_0/minimal.json");

    assert_eq!(loaded.source_version, SchemaVersion::V1_0);
    assert_eq!(loaded.source_encoding, Encoding::Json);

    let component = &loaded.bom.components.as_ref().expect("components")[0];
    assert_eq!(component.version.as_deref(), Some("9.0.14"));
    // An explicit false is carried through, not dropped
    assert_eq!(component.modified, Some(false));
}

#[test]
fn golden_v1_0_nested_components() {
    let loaded = load_fixture("tests/fixtures/v1_0/nested.xml");
    let bom = &loaded.bom;
    assert_eq!(bom.version, Some(3));

    let app = &bom.components.as_ref().expect("components")[0];
    assert_eq!(app.component_type, ComponentType::Application);
    assert_eq!(app.publisher.as_deref(), Some("Acme Inc"));
    assert_eq!(app.modified, Some(false));

    let hashes = app.hashes.as_ref().expect("hashes");
    assert_eq!(hashes.len(), 2);
    assert_eq!(hashes[0].alg, HashAlgorithm::Sha1);
    assert_eq!(hashes[1].alg, HashAlgorithm::Sha256);
    assert_eq!(
        app.licenses.as_ref().expect("licenses")[0],
        LicenseChoice::spdx_id("Apache-2.0")
    );

    let children = app.components.as_ref().expect("nested components");
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["commons-lang3", "spring-core"]);
    assert_eq!(children[0].modified, Some(true));
    assert_eq!(
        children[1].licenses.as_ref().expect("licenses")[0],
        LicenseChoice::Expression("Apache-2.0 OR MIT".to_string())
    );
}

#[test]
fn golden_v1_1_pedigree_xml_and_json_agree() {
    let xml = load_fixture("tests/fixtures/v1_1/pedigree.xml");
    let json = load_fixture("tests/fixtures/v1_1/pedigree.json");

    assert_eq!(xml.source_version, SchemaVersion::V1_1);
    assert_eq!(json.source_version, SchemaVersion::V1_1);
    assert_eq!(xml.source_encoding, Encoding::Xml);
    assert_eq!(json.source_encoding, Encoding::Json);
    assert_eq!(xml.bom, json.bom);

    let bom = &xml.bom;
    assert_eq!(
        bom.serial_number.as_deref(),
        Some("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79")
    );
    let refs = bom.external_references.as_ref().expect("external references");
    assert_eq!(refs[0].ref_type, ExternalReferenceType::Website);
    assert_eq!(refs[0].comment.as_deref(), Some("Project home"));

    let patched = &bom.components.as_ref().expect("components")[0];
    assert_eq!(
        patched.bom_ref.as_deref(),
        Some("pkg:maven/org.example/patched-lib@1.0.1")
    );
    let pedigree = patched.pedigree.as_ref().expect("pedigree");
    assert_eq!(pedigree.ancestors.as_ref().expect("ancestors")[0].name, "lib");
    assert_eq!(
        pedigree.commits.as_ref().expect("commits")[0].uid.as_deref(),
        Some("7638417db6d59f3c431d3e1f261cc637155684cd")
    );
    // Patches only exist from 1.2 on
    assert_eq!(pedigree.patches, None);
    assert_eq!(
        pedigree.notes.as_deref(),
        Some("Backported fix from upstream main")
    );
}

#[test]
fn golden_v1_2_full_xml_and_json_agree() {
    let xml = load_fixture("tests/fixtures/v1_2/full.xml");
    let json = load_fixture("tests/fixtures/v1_2/full.json");

    assert!(xml.was_latest());
    assert!(json.was_latest());
    assert_eq!(xml.bom, json.bom);
}

#[test]
fn golden_v1_2_full_contents() {
    let bom = load_fixture("tests/fixtures/v1_2/full.json").into_bom();
    assert_eq!(bom.version, Some(2));

    let metadata = bom.metadata.as_ref().expect("metadata");
    assert_eq!(metadata.timestamp.as_deref(), Some("2021-02-09T20:40:32Z"));
    assert_eq!(
        metadata.tools.as_ref().expect("tools")[0].name.as_deref(),
        Some("cyclonedx-maven-plugin")
    );
    assert_eq!(
        metadata.component.as_ref().expect("component").bom_ref.as_deref(),
        Some("acme-app")
    );
    let supplier = metadata.supplier.as_ref().expect("supplier");
    assert_eq!(supplier.url, Some(vec!["https://example.com".to_string()]));
    assert_eq!(metadata.manufacture, None);

    let components = bom.components.as_ref().expect("components");
    assert_eq!(components[0].author.as_deref(), Some("Acme Library Team"));
    let patch = &components[0]
        .pedigree
        .as_ref()
        .and_then(|p| p.patches.as_ref())
        .expect("patches")[0];
    assert_eq!(patch.patch_type, PatchClassification::Backport);
    let issue = &patch.resolves.as_ref().expect("resolves")[0];
    assert_eq!(issue.issue_type, IssueClassification::Security);
    assert_eq!(
        issue.source.as_ref().and_then(|s| s.name.as_deref()),
        Some("NVD")
    );
    assert_eq!(components[1].component_type, ComponentType::File);
    assert_eq!(components[1].mime_type.as_deref(), Some("text/plain"));

    let service = &bom.services.as_ref().expect("services")[0];
    assert_eq!(service.authenticated, Some(true));
    assert_eq!(service.x_trust_boundary, Some(false));
    let data = service.data.as_ref().expect("data");
    assert_eq!(data[1].flow, DataFlow::BiDirectional);

    let dependencies = bom.dependencies.as_ref().expect("dependencies");
    assert_eq!(dependencies.len(), 2);
    assert_eq!(
        dependencies[0].depends_on,
        Some(vec![
            "pkg:npm/acme-lib@1.0.0".to_string(),
            "svc-billing".to_string()
        ])
    );
    // `dependsOn: []` is normalized away, the node itself stays
    assert_eq!(dependencies[1].depends_on, None);
}

#[test]
fn golden_v1_2_swid_tags() {
    let xml = load_fixture("tests/fixtures/v1_2/swid.xml");
    let json = load_fixture("tests/fixtures/v1_2/swid.json");
    assert_eq!(xml.bom, json.bom);

    let components = json.bom.components.as_ref().expect("components");
    let full = components[0].swid.as_ref().expect("swid");
    assert_eq!(
        full.tag_id,
        "swidgen-242eb18a-503e-ca37-393b-cf156ef09691_9.1.1"
    );
    assert_eq!(full.name, "Acme Application");
    assert_eq!(full.tag_version, Some(0));
    assert_eq!(full.patch, Some(false));
    let text = full.text.as_ref().expect("swid text");
    assert_eq!(text.content_type.as_deref(), Some("text/xml"));
    assert_eq!(text.encoding.as_deref(), Some("base64"));
    assert_eq!(full.url, None);

    let minimal = components[1].swid.as_ref().expect("swid");
    assert_eq!(minimal.version, None);
    assert_eq!(minimal.tag_version, None);
    assert_eq!(minimal.patch, None);
    assert_eq!(
        minimal.url.as_deref(),
        Some("https://example.com/swid/acme-agent-2.0.0.xml")
    );

    // Tags are carried through a save in either encoding
    for encoding in [Encoding::Json, Encoding::Xml] {
        let saved = save_as(&json.bom, encoding, false).expect("save should succeed");
        assert!(saved.contains("swidgen-242eb18a"), "{encoding}: {saved}");
        assert_eq!(load_str(&saved).expect("reload").bom, json.bom);
    }
}

#[test]
fn golden_v1_2_omitted_dependencies_stay_omitted() {
    let loaded = load_fixture("tests/fixtures/v1_2/no-dependencies.json");
    assert_eq!(loaded.bom.dependencies, None);

    for encoding in [Encoding::Json, Encoding::Xml] {
        let saved = save_as(&loaded.bom, encoding, true).expect("save should succeed");
        assert!(!saved.contains("dependencies"), "{encoding}: {saved}");

        let reloaded = load_str(&saved).expect("reload should succeed");
        assert_eq!(reloaded.bom.dependencies, None);
        assert_eq!(reloaded.bom, loaded.bom);
    }
}

#[test]
fn golden_v1_2_empty_collections_collapse() {
    let loaded = load_fixture("tests/fixtures/v1_2/empty-collections.xml");
    let bom = &loaded.bom;

    assert_eq!(bom.components, None);
    assert_eq!(bom.services, None);
    assert_eq!(bom.external_references, None);
    assert_eq!(bom.dependencies, None);
    assert!(sbom_migrate::is_normalized(bom));
}

#[test]
fn golden_unrecognized_documents() {
    for path in [
        "tests/fixtures/invalid/spdx.json",
        "tests/fixtures/invalid/future-version.json",
        "tests/fixtures/invalid/unknown-namespace.xml",
    ] {
        let content = std::fs::read_to_string(path).expect("fixture readable");
        let err = load_str(&content).expect_err(path);
        // Sniffing narrows to the three decoders of one encoding
        assert_eq!(err.attempts.len(), 3, "{path}");
        let versions: Vec<_> = err.attempts.iter().map(|a| a.version).collect();
        assert_eq!(versions, SchemaVersion::NEWEST_FIRST.to_vec(), "{path}");
    }
}
