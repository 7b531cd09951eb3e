//! SBOM 생성 API 에러 타입
//!
//! [`GeneratorError`]는 생성 호출 한 번에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<GeneratorError> for SbomToolError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **호출 인자**: `InvalidArgument` (검증기 실행 전 즉시 반환)
//! - **구성 검증**: `Validation` (워크플로 호출 전 중단)
//! - **레지스트리**: `NotFound`, `AlreadyRegistered`
//! - **설정 파일**: `Config`
//!
//! 워크플로 실패는 에러가 아니라 [`GenerationResult`](sbomkit_core::GenerationResult)
//! 안의 데이터로 전달됩니다.

use sbomkit_core::error::{ConfigError, RegistryError, SbomToolError};

/// SBOM 생성 API 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// 필수 인자가 없거나 비어 있음
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// 인자 이름
        argument: String,
        /// 거부 사유
        reason: String,
    },

    /// 구성 필드가 검증기에 의해 거부됨
    #[error("validation failed for '{field}': {reason}")]
    Validation {
        /// 구성 필드명
        field: String,
        /// 거부 사유
        reason: String,
    },

    /// 요청한 명세의 생성기가 등록되지 않음
    #[error("no manifest generator registered for {specification}")]
    NotFound {
        /// 조회한 명세 (`NAME:VERSION`)
        specification: String,
    },

    /// 같은 명세의 생성기가 중복 등록됨
    #[error("manifest generator already registered for {specification}")]
    AlreadyRegistered {
        /// 중복된 명세
        specification: String,
    },

    /// 설정 파일 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<ConfigError> for GeneratorError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidArgument { name, reason } => Self::InvalidArgument {
                argument: name,
                reason,
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::InvalidValue { field, reason } => Self::Config { field, reason },
            ConfigError::FileNotFound { path } => Self::Config {
                field: "path".to_owned(),
                reason: format!("config file not found: {path}"),
            },
            ConfigError::ParseFailed { reason } => Self::Config {
                field: "file".to_owned(),
                reason,
            },
        }
    }
}

impl From<RegistryError> for GeneratorError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { manifest } => Self::NotFound {
                specification: manifest,
            },
            RegistryError::AlreadyRegistered { manifest } => Self::AlreadyRegistered {
                specification: manifest,
            },
        }
    }
}

impl From<SbomToolError> for GeneratorError {
    fn from(err: SbomToolError) -> Self {
        match err {
            SbomToolError::Config(e) => e.into(),
            SbomToolError::Registry(e) => e.into(),
            other => Self::Config {
                field: "settings".to_owned(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<GeneratorError> for SbomToolError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::InvalidArgument { argument, reason } => {
                SbomToolError::Config(ConfigError::InvalidArgument {
                    name: argument,
                    reason,
                })
            }
            GeneratorError::Validation { field, reason } => {
                SbomToolError::Config(ConfigError::Validation { field, reason })
            }
            GeneratorError::NotFound { specification } => {
                SbomToolError::Registry(RegistryError::NotFound {
                    manifest: specification,
                })
            }
            GeneratorError::AlreadyRegistered { specification } => {
                SbomToolError::Registry(RegistryError::AlreadyRegistered {
                    manifest: specification,
                })
            }
            GeneratorError::Config { field, reason } => {
                SbomToolError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}
