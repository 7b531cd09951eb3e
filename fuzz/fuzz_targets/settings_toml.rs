#![no_main]

use libfuzzer_sys::fuzz_target;
use sbomkit_core::config::SbomToolConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(config) = SbomToolConfig::parse(content) {
            let _ = config.validate();
            let _ = config.generation.default_manifest_info();
        }
    }
});
