#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_migrate::codec::{FormatCodec, XmlCodec};
use sbom_migrate::model::{v1_0, v1_1, v1_2};

/// Fuzz each XML decoder on its own.
///
/// Exercises the root element scan and namespace resolution, including
/// prefixed roots, before the tree mapping.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = XmlCodec::<v1_0::Bom>::new().decode(s);
        let _ = XmlCodec::<v1_1::Bom>::new().decode(s);
        let _ = XmlCodec::<v1_2::Bom>::new().decode(s);
    }
});
