//! CycloneDX 1.5 생성기 descriptor

use sbomkit_core::{AlgorithmName, ManifestGenerator, ManifestInfo};

/// CycloneDX 형식 이름
pub const CYCLONEDX_NAME: &str = "CycloneDX";
/// 지원 CycloneDX 버전
pub const CYCLONEDX_VERSION: &str = "1.5";

const REQUIRED_ALGORITHMS: [AlgorithmName; 2] = [AlgorithmName::Sha256, AlgorithmName::Sha512];

/// CycloneDX 1.5 생성기
#[derive(Debug, Clone, Copy, Default)]
pub struct CycloneDx15Generator;

impl ManifestGenerator for CycloneDx15Generator {
    fn manifest_info(&self) -> ManifestInfo {
        ManifestInfo::new(CYCLONEDX_NAME, CYCLONEDX_VERSION)
    }

    fn required_hash_algorithms(&self) -> &[AlgorithmName] {
        &REQUIRED_ALGORITHMS
    }
}
