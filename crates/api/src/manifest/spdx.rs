//! SPDX 2.2 생성기 descriptor
//!
//! [SPDX](https://spdx.dev/) 2.2 JSON 문서는 파일마다 SHA-256과 SHA-1 체크섬을 요구합니다.
//! 문서 직렬화는 생성 워크플로가 담당합니다.

use sbomkit_core::{AlgorithmName, ManifestGenerator, ManifestInfo};

/// SPDX 형식 이름
pub const SPDX_NAME: &str = "SPDX";
/// 지원 SPDX 버전
pub const SPDX_VERSION: &str = "2.2";

const REQUIRED_ALGORITHMS: [AlgorithmName; 2] = [AlgorithmName::Sha256, AlgorithmName::Sha1];

/// SPDX 2.2 생성기
#[derive(Debug, Clone, Copy, Default)]
pub struct Spdx22Generator;

impl ManifestGenerator for Spdx22Generator {
    fn manifest_info(&self) -> ManifestInfo {
        ManifestInfo::new(SPDX_NAME, SPDX_VERSION)
    }

    fn required_hash_algorithms(&self) -> &[AlgorithmName] {
        &REQUIRED_ALGORITHMS
    }
}
