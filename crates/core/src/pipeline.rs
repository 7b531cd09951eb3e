//! 파이프라인 trait — 외부 협력자 확장 포인트 정의

use std::future::Future;
use std::pin::Pin;

use crate::error::TelemetryError;
use crate::types::{AlgorithmName, ManifestInfo, TelemetryRecord};

/// dyn 호환 trait에서 사용하는 boxed future
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// 매니페스트 생성기 trait
///
/// 하나의 매니페스트 형식(이름 + 버전)에 바인딩되며, 그 형식이 요구하는
/// 해시 알고리즘을 선언합니다. 새 형식을 지원하려면 이 trait을 구현하여
/// 레지스트리에 등록합니다.
pub trait ManifestGenerator: Send + Sync {
    /// 이 생성기가 담당하는 매니페스트 형식
    fn manifest_info(&self) -> ManifestInfo;

    /// 생성에 필요한 해시 알고리즘 (선언 순서 유지)
    fn required_hash_algorithms(&self) -> &[AlgorithmName];
}

/// 텔레메트리 싱크 trait
///
/// 호출 종료 시 [`TelemetryRecord`]를 받아 외부로 내보냅니다.
/// `Vec<Arc<dyn TelemetrySink>>` 형태로 보관할 수 있도록 [`BoxFuture`]를 반환합니다.
pub trait TelemetrySink: Send + Sync {
    /// 싱크 이름 (로깅용)
    fn name(&self) -> &str;

    /// 레코드를 플러시합니다.
    fn flush<'a>(
        &'a self,
        record: &'a TelemetryRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>>;
}
