#![no_main]

use std::path::PathBuf;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sbomkit_api::configuration::{ConfigSanitizer, Configuration, Setting};
use sbomkit_core::{ManifestInfo, ManifestToolAction};

/// 퍼저용 구성 입력
#[derive(Arbitrary, Debug)]
struct FuzzConfiguration {
    validate: bool,
    root: Option<String>,
    manifest_dir: Option<String>,
    package_name: Option<String>,
    namespace_uri_base: Option<String>,
    manifests: Vec<(String, String)>,
}

fuzz_target!(|input: FuzzConfiguration| {
    let action = if input.validate {
        ManifestToolAction::Validate
    } else {
        ManifestToolAction::Generate
    };

    let mut config = Configuration::new(action);
    config.build_drop_path = input.root.map(|p| Setting::api(PathBuf::from(p)));
    config.manifest_dir_path = input.manifest_dir.map(|p| Setting::api(PathBuf::from(p)));
    config.package_name = input.package_name.map(Setting::api);
    config.namespace_uri_base = input.namespace_uri_base.map(Setting::api);
    config.manifest_info = Some(Setting::api(
        input
            .manifests
            .into_iter()
            .take(16)
            .map(|(name, version)| ManifestInfo::new(name, version))
            .collect(),
    ));

    // 정규화는 실패하지 않고 멱등이어야 함
    let sanitizer = ConfigSanitizer::default();
    sanitizer.sanitize(&mut config);
    let once = config.clone();
    sanitizer.sanitize(&mut config);
    assert_eq!(config, once);
});
