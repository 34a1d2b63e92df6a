#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_migrate::codec::{FormatCodec, JsonCodec};
use sbom_migrate::model::{v1_0, v1_1, v1_2};

/// Fuzz each JSON decoder on its own.
///
/// Focuses on the `bomFormat`/`specVersion` header checks and the mapping
/// of the remaining object onto each revision's tree.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = JsonCodec::<v1_0::Bom>::new().decode(s);
        let _ = JsonCodec::<v1_1::Bom>::new().decode(s);
        let _ = JsonCodec::<v1_2::Bom>::new().decode(s);
    }
});
