//! 매니페스트 생성기 레지스트리
//!
//! [`ManifestGeneratorProvider`]는 [`ManifestInfo`]를 키로 생성기를 조회합니다.
//! [`ManifestGeneratorProviderBuilder`]로 한 번 만든 뒤에는 변경할 수 없으며,
//! `Arc`로 여러 호출이 공유합니다.

pub mod cyclonedx;
pub mod spdx;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use sbomkit_core::error::RegistryError;
use sbomkit_core::metrics as m;
use sbomkit_core::{ManifestGenerator, ManifestInfo};

pub use cyclonedx::CycloneDx15Generator;
pub use spdx::Spdx22Generator;

/// 매니페스트 생성기 레지스트리 (읽기 전용)
pub struct ManifestGeneratorProvider {
    generators: HashMap<ManifestInfo, Arc<dyn ManifestGenerator>>,
    /// 등록 순서
    order: Vec<ManifestInfo>,
}

impl ManifestGeneratorProvider {
    /// 새 빌더를 생성합니다.
    pub fn builder() -> ManifestGeneratorProviderBuilder {
        ManifestGeneratorProviderBuilder::new()
    }

    /// 기본 생성기(SPDX 2.2, CycloneDX 1.5)를 등록한 레지스트리를 생성합니다.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        Self::builder()
            .register(Arc::new(Spdx22Generator))
            .register(Arc::new(CycloneDx15Generator))
            .build()
    }

    /// 매니페스트 형식에 바인딩된 생성기를 조회합니다.
    pub fn get(&self, info: &ManifestInfo) -> Result<Arc<dyn ManifestGenerator>, RegistryError> {
        match self.generators.get(info) {
            Some(generator) => {
                metrics::counter!(m::REGISTRY_LOOKUPS_TOTAL, m::LABEL_RESULT => "hit")
                    .increment(1);
                Ok(Arc::clone(generator))
            }
            None => {
                metrics::counter!(m::REGISTRY_LOOKUPS_TOTAL, m::LABEL_RESULT => "miss")
                    .increment(1);
                debug!(manifest = %info, "no manifest generator registered");
                Err(RegistryError::NotFound {
                    manifest: info.to_string(),
                })
            }
        }
    }

    /// 등록된 매니페스트 형식을 등록 순서대로 반환합니다.
    pub fn supported_manifest_infos(&self) -> Vec<ManifestInfo> {
        self.order.clone()
    }

    /// 등록된 생성기 수
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// 등록된 생성기가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for ManifestGeneratorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestGeneratorProvider")
            .field("manifests", &self.order)
            .finish()
    }
}

/// 레지스트리 빌더
#[derive(Default)]
pub struct ManifestGeneratorProviderBuilder {
    generators: Vec<Arc<dyn ManifestGenerator>>,
}

impl ManifestGeneratorProviderBuilder {
    /// 빈 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 생성기를 등록합니다.
    pub fn register(mut self, generator: Arc<dyn ManifestGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    /// 레지스트리를 빌드합니다.
    ///
    /// 같은 매니페스트 형식(대소문자 무시)을 두 번 등록하면 실패합니다.
    pub fn build(self) -> Result<ManifestGeneratorProvider, RegistryError> {
        let mut generators = HashMap::with_capacity(self.generators.len());
        let mut order = Vec::with_capacity(self.generators.len());

        for generator in self.generators {
            let info = generator.manifest_info();
            if generators.contains_key(&info) {
                return Err(RegistryError::AlreadyRegistered {
                    manifest: info.to_string(),
                });
            }
            order.push(info.clone());
            generators.insert(info, generator);
        }

        debug!(generators = order.len(), "manifest generator registry built");
        Ok(ManifestGeneratorProvider { generators, order })
    }
}
