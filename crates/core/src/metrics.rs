//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 라이브러리는 익스포터를 설치하지 않으며, 전역 레코더가 없으면
//! `metrics` 매크로는 아무 동작도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `sbomkit_`
//! - 접미어: `_total` (counter), `_seconds` (histogram), 없음 (gauge)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

/// 구성 필드 레이블 키
pub const LABEL_FIELD: &str = "field";

// ─── Generation 메트릭 ─────────────────────────────────────────────

/// 완료된 생성 호출 수 (counter, label: result)
pub const GENERATION_RUNS_TOTAL: &str = "sbomkit_generation_runs_total";

/// 워크플로 소요 시간 (histogram, 초)
pub const GENERATION_DURATION_SECONDS: &str = "sbomkit_generation_duration_seconds";

/// 검증기에 의해 거부된 호출 수 (counter, label: field)
pub const VALIDATION_FAILURES_TOTAL: &str = "sbomkit_validation_failures_total";

/// 워크플로가 기록한 에러 레코드 수 (counter)
pub const GENERATION_ERRORS_TOTAL: &str = "sbomkit_generation_errors_total";

// ─── Registry 메트릭 ───────────────────────────────────────────────

/// 생성기 조회 수 (counter, label: result)
pub const REGISTRY_LOOKUPS_TOTAL: &str = "sbomkit_registry_lookups_total";

// ─── 히스토그램 버킷 정의 ────────────────────────────────────────────

/// 생성 소요 시간 히스토그램 버킷 (초)
///
/// 100ms ~ 600s 범위 (대형 드롭 디렉토리 스캔 포함)
pub const GENERATION_DURATION_BUCKETS: [f64; 9] =
    [0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 300.0, 600.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        GENERATION_RUNS_TOTAL,
        "Total number of SBOM generation calls that reached the workflow"
    );
    describe_histogram!(
        GENERATION_DURATION_SECONDS,
        "Time spent in the generation workflow in seconds"
    );
    describe_counter!(
        VALIDATION_FAILURES_TOTAL,
        "Total number of generation calls rejected by a configuration validator"
    );
    describe_counter!(
        GENERATION_ERRORS_TOTAL,
        "Total number of error records reported by the generation workflow"
    );
    describe_counter!(
        REGISTRY_LOOKUPS_TOTAL,
        "Total number of manifest generator registry lookups"
    );
}
