#![no_main]

use libfuzzer_sys::fuzz_target;
use sbomkit_core::SbomSpecification;

fuzz_target!(|data: &str| {
    if let Ok(spec) = data.parse::<SbomSpecification>() {
        // 파싱에 성공한 명세는 비어 있지 않고, 표시 형식이 다시 같은 명세로 파싱되어야 함
        assert!(!spec.is_blank());
        let reparsed: SbomSpecification = spec
            .to_string()
            .parse()
            .expect("displayed specification must parse");
        assert_eq!(reparsed.to_manifest_info(), spec.to_manifest_info());
    }
});
