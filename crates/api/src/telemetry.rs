//! 텔레메트리 레코더 -- 호출 단위 에러/스위치/예외 수집 및 종료 시 플러시
//!
//! [`TelemetryRecorder`]는 생성 호출마다 새로 만들어집니다. 워크플로는 실행 중
//! 에러 레코드를 기록하고, 오케스트레이터는 워크플로가 끝난 뒤
//! [`finalize_and_flush`](TelemetryRecorder::finalize_and_flush)를 정확히 한 번 호출합니다.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use sbomkit_core::error::TelemetryError;
use sbomkit_core::{
    BoxFuture, FileValidationResult, ManifestToolAction, TelemetryRecord, TelemetrySink,
};

/// 레코더 내부 상태
#[derive(Debug, Default)]
struct RecorderState {
    errors: Vec<FileValidationResult>,
    switches: Vec<(String, String)>,
    exceptions: Vec<String>,
    outcome: Option<(bool, Duration)>,
    finalized: bool,
}

/// 호출 단위 텔레메트리 레코더
#[derive(Debug)]
pub struct TelemetryRecorder {
    run_id: String,
    action: ManifestToolAction,
    state: Mutex<RecorderState>,
}

impl TelemetryRecorder {
    /// 새 실행 ID(UUID v4)로 레코더를 생성합니다.
    pub fn new(action: ManifestToolAction) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            action,
            state: Mutex::new(RecorderState::default()),
        }
    }

    /// 실행 ID
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// 수행 중인 동작
    pub fn action(&self) -> ManifestToolAction {
        self.action
    }

    /// 에러 레코드를 추가합니다 (기록 순서 유지).
    pub async fn record_error(&self, error: FileValidationResult) {
        let mut state = self.state.lock().await;
        if state.finalized {
            warn!(run_id = %self.run_id, "error recorded after telemetry was finalized");
        }
        state.errors.push(error);
    }

    /// 구성 스위치(이름, 값)를 기록합니다.
    pub async fn record_switch(&self, name: impl Into<String>, value: impl ToString) {
        self.state
            .lock()
            .await
            .switches
            .push((name.into(), value.to_string()));
    }

    /// API 예외 메시지를 기록합니다.
    pub async fn record_exception(&self, message: impl Into<String>) {
        self.state.lock().await.exceptions.push(message.into());
    }

    /// 워크플로 결과와 소요 시간을 기록합니다.
    pub async fn record_outcome(&self, is_successful: bool, duration: Duration) {
        self.state.lock().await.outcome = Some((is_successful, duration));
    }

    /// 기록된 에러 레코드를 기록 순서대로 반환합니다.
    pub async fn errors(&self) -> Vec<FileValidationResult> {
        self.state.lock().await.errors.clone()
    }

    /// 이미 확정되었는지 확인합니다.
    pub async fn is_finalized(&self) -> bool {
        self.state.lock().await.finalized
    }

    /// 레코드를 확정하고 싱크로 플러시합니다.
    ///
    /// 두 번째 호출부터는 아무 작업도 하지 않고 `false`를 반환합니다.
    /// 싱크 실패는 경고로 기록될 뿐 호출을 실패시키지 않습니다.
    pub async fn finalize_and_flush(&self, sink: &dyn TelemetrySink) -> bool {
        let record = {
            let mut state = self.state.lock().await;
            if state.finalized {
                debug!(run_id = %self.run_id, "telemetry already finalized");
                return false;
            }
            state.finalized = true;

            let (is_successful, duration) = state.outcome.unwrap_or((false, Duration::ZERO));
            TelemetryRecord {
                run_id: self.run_id.clone(),
                action: self.action,
                is_successful,
                duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                switches: state.switches.clone(),
                error_count: state.errors.len(),
                exceptions: state.exceptions.clone(),
            }
        };

        if let Err(e) = sink.flush(&record).await {
            warn!(
                run_id = %self.run_id,
                sink = sink.name(),
                error = %e,
                "failed to flush telemetry"
            );
        }
        true
    }
}

/// 레코드를 구조화된 tracing 이벤트로 내보내는 싱크
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn flush<'a>(
        &'a self,
        record: &'a TelemetryRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>> {
        Box::pin(async move {
            let json = serde_json::to_string(record)
                .map_err(|e| TelemetryError::Serialize(e.to_string()))?;
            info!(
                target: "sbomkit::telemetry",
                run_id = %record.run_id,
                action = %record.action,
                is_successful = record.is_successful,
                duration_ms = record.duration_ms,
                error_count = record.error_count,
                record = %json,
                "telemetry record"
            );
            Ok(())
        })
    }
}

/// 레코드를 버리는 싱크 (`[telemetry] enabled = false`)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetrySink;

impl TelemetrySink for NullTelemetrySink {
    fn name(&self) -> &str {
        "null"
    }

    fn flush<'a>(
        &'a self,
        _record: &'a TelemetryRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>> {
        Box::pin(async { Ok(()) })
    }
}
