//! 에러 타입 — 도메인별 에러 정의

/// sbomkit 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SbomToolError {
    /// 설정 및 구성 검증 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 매니페스트 생성기 레지스트리 에러
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// 텔레메트리 에러
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 및 구성 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 필수 호출 인자가 없거나 비어 있음
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// 구성 필드가 검증기에 의해 거부됨
    #[error("validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 생성기 레지스트리 에러
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// 해당 매니페스트 형식의 생성기가 등록되지 않음
    #[error("no manifest generator registered for {manifest}")]
    NotFound { manifest: String },

    /// 동일한 매니페스트 형식의 생성기가 이미 등록됨
    #[error("manifest generator already registered for {manifest}")]
    AlreadyRegistered { manifest: String },
}

/// 텔레메트리 에러
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// 싱크로 플러시 실패
    #[error("telemetry flush failed: {0}")]
    FlushFailed(String),

    /// 텔레메트리 레코드 직렬화 실패
    #[error("telemetry serialization failed: {0}")]
    Serialize(String),
}
