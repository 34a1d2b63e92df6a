//! Property-based tests for trial decoding.
//!
//! Ensures detection doesn't panic on arbitrary input, including random
//! strings, JSON-like fragments, and XML-like fragments.

use proptest::prelude::*;
use sbom_migrate::codec::Encoding;
use sbom_migrate::load_str;

proptest! {
    // 500 cases balances coverage vs speed for decoder fuzz tests.
    // Random input is expected to produce Err in almost all cases, so most
    // properties only assert no-panic.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn load_str_doesnt_panic(s in "\\PC{0,2000}") {
        // Random input should always return Err, never panic
        let result = load_str(&s);
        prop_assert!(result.is_err(), "Random input should not load successfully: {:?}", s);
    }

    #[test]
    fn sniff_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = Encoding::sniff(&s);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = load_str(&s);
    }

    #[test]
    fn xml_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"<[a-z]{1,20}>[^<]{0,200}</[a-z]{1,20}>"#).unwrap()
    ) {
        let _ = load_str(&s);
    }

    #[test]
    fn empty_and_whitespace_doesnt_panic(s in "\\s{0,100}") {
        let result = load_str(&s);
        prop_assert!(result.is_err());
    }

    #[test]
    fn unsupported_spec_version_is_rejected(
        minor in 3u32..10,
        extra in "[a-z]{0,20}",
    ) {
        let input = format!(
            r#"{{"bomFormat": "CycloneDX", "specVersion": "1.{minor}", "version": 1, "serialNumber": "{extra}"}}"#
        );
        let err = load_str(&input).unwrap_err();
        // One rejection per JSON decoder
        prop_assert_eq!(err.attempts.len(), 3);
    }

    #[test]
    fn supported_spec_version_with_arbitrary_body_doesnt_panic(
        minor in 0u32..3,
        extra in "\\PC{0,200}",
    ) {
        let input = format!(
            r#"{{"bomFormat": "CycloneDX", "specVersion": "1.{minor}", "components": [{extra}]}}"#
        );
        let _ = load_str(&input);
    }

    #[test]
    fn unknown_xml_namespace_is_rejected(segment in "[a-z0-9]{1,12}") {
        let input = format!(
            r#"<bom xmlns="http://example.com/{segment}" version="1"><components/></bom>"#
        );
        let err = load_str(&input).unwrap_err();
        // One rejection per XML decoder
        prop_assert_eq!(err.attempts.len(), 3);
    }

    #[test]
    fn bom_with_arbitrary_children_doesnt_panic(
        minor in 0u32..3,
        tag in "[a-zA-Z]{1,15}",
        body in "[^<&]{0,100}",
    ) {
        let input = format!(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.{minor}"><{tag}>{body}</{tag}></bom>"#
        );
        let _ = load_str(&input);
    }
}
