#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the full load path.
///
/// Trial decoding, the upgrade chain and normalization must never panic,
/// and anything that loads must load again unchanged after saving.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(loaded) = sbom_migrate::load_str(s) {
            if let Ok(saved) = sbom_migrate::save_as(&loaded.bom, loaded.source_encoding, false) {
                let reloaded = sbom_migrate::load_str(&saved).expect("saved document must load");
                assert_eq!(reloaded.bom, loaded.bom);
            }
        }
    }
});
