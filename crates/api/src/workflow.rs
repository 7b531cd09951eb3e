//! 생성 워크플로 trait
//!
//! 파일시스템 순회, 해시 계산, 매니페스트 직렬화는 이 crate의 범위 밖이며
//! [`GenerationWorkflow`] 구현체가 담당합니다.

use std::future::Future;
use std::sync::Arc;

use crate::configuration::FinalizedConfiguration;
use crate::telemetry::TelemetryRecorder;

/// SBOM 생성 워크플로
///
/// 오케스트레이터는 호출마다 `run`을 정확히 한 번 호출하고 결과를 기다립니다.
/// 구현체는 처리 중 발생한 문제를 `recorder`에 기록하고, 전체 성공 여부를 반환합니다.
pub trait GenerationWorkflow: Send + Sync {
    /// 확정된 구성으로 생성을 수행합니다.
    fn run(
        &self,
        config: &FinalizedConfiguration,
        recorder: &TelemetryRecorder,
    ) -> impl Future<Output = bool> + Send;
}

impl<W: GenerationWorkflow> GenerationWorkflow for Arc<W> {
    fn run(
        &self,
        config: &FinalizedConfiguration,
        recorder: &TelemetryRecorder,
    ) -> impl Future<Output = bool> + Send {
        (**self).run(config, recorder)
    }
}
