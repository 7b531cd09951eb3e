//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 호출자 입력(명세, 메타데이터, 런타임 옵션)과 결과(에러 엔티티, 생성 결과)를
//! 표현하는 데이터 구조를 정의합니다.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 워크플로 병렬도 기본값
pub const DEFAULT_PARALLELISM: usize = 8;
/// 워크플로 병렬도 하한
pub const MIN_PARALLELISM: usize = 1;
/// 워크플로 병렬도 상한
pub const MAX_PARALLELISM: usize = 48;

/// 해시 알고리즘 이름
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmName {
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-512
    Sha512,
    /// MD5
    Md5,
}

impl AlgorithmName {
    /// 문자열에서 알고리즘을 파싱합니다.
    ///
    /// 대소문자와 하이픈을 무시합니다 (`"sha-256"`, `"SHA256"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "").as_str() {
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            "md5" => Some(Self::Md5),
            _ => None,
        }
    }
}

impl fmt::Display for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Sha256 => write!(f, "SHA256"),
            Self::Sha512 => write!(f, "SHA512"),
            Self::Md5 => write!(f, "MD5"),
        }
    }
}

/// 매니페스트 형식 식별자 (레지스트리 키)
///
/// 이름과 버전 모두 대소문자를 구분하지 않고 비교합니다.
/// `Hash` 구현도 동일한 규칙을 따르므로 `HashMap` 키로 안전하게 사용할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestInfo {
    /// 형식 이름 (예: `"SPDX"`)
    pub name: String,
    /// 형식 버전 (예: `"2.2"`)
    pub version: String,
}

impl ManifestInfo {
    /// 새 매니페스트 식별자를 생성합니다.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl PartialEq for ManifestInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.version.eq_ignore_ascii_case(&other.version)
    }
}

impl Eq for ManifestInfo {}

impl Hash for ManifestInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.to_ascii_lowercase().hash(state);
        self.version.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for ManifestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

/// SBOM 명세 — 호출자가 요청하는 매니페스트 형식과 버전
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SbomSpecification {
    /// 형식 이름
    pub name: String,
    /// 형식 버전
    pub version: String,
}

impl SbomSpecification {
    /// 새 명세를 생성합니다.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// 이름 또는 버전이 비어 있는지 확인합니다.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() || self.version.trim().is_empty()
    }

    /// 레지스트리 조회용 [`ManifestInfo`]로 변환합니다.
    pub fn to_manifest_info(&self) -> ManifestInfo {
        ManifestInfo::new(self.name.trim(), self.version.trim())
    }
}

impl From<&ManifestInfo> for SbomSpecification {
    fn from(info: &ManifestInfo) -> Self {
        Self::new(info.name.clone(), info.version.clone())
    }
}

impl FromStr for SbomSpecification {
    type Err = ConfigError;

    /// `"NAME:VERSION"` 형식을 파싱합니다 (예: `"SPDX:2.2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            field: "specification".to_owned(),
            reason: format!("'{s}' must be in NAME:VERSION form"),
        };
        let (name, version) = s.split_once(':').ok_or_else(invalid)?;
        let spec = Self::new(name.trim(), version.trim());
        if spec.is_blank() {
            return Err(invalid());
        }
        Ok(spec)
    }
}

impl fmt::Display for SbomSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

/// 매니페스트 메타데이터 — 빌드 및 패키지 식별 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SbomMetadata {
    /// 빌드 환경 이름 (예: `"azure_pipelines"`)
    pub build_environment_name: Option<String>,
    /// 빌드 이름
    pub build_name: Option<String>,
    /// 빌드 ID
    pub build_id: Option<String>,
    /// 커밋 ID
    pub commit_id: Option<String>,
    /// 브랜치
    pub branch: Option<String>,
    /// 저장소 URI
    pub repository_uri: Option<String>,
    /// 패키지 이름
    pub package_name: Option<String>,
    /// 패키지 버전
    pub package_version: Option<String>,
    /// 패키지 공급자
    pub package_supplier: Option<String>,
}

/// 로그 상세 수준
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// 모든 이벤트
    Verbose,
    /// 디버그
    Debug,
    /// 정보
    Information,
    /// 경고 이상
    #[default]
    Warning,
    /// 에러 이상
    Error,
    /// 치명적 에러만
    Fatal,
}

impl Verbosity {
    /// 문자열에서 상세 수준을 파싱합니다 (대소문자 구분 없음).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "verbose" | "trace" => Some(Self::Verbose),
            "debug" => Some(Self::Debug),
            "information" | "info" => Some(Self::Information),
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbose => write!(f, "verbose"),
            Self::Debug => write!(f, "debug"),
            Self::Information => write!(f, "information"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// 생성 워크플로 런타임 옵션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfiguration {
    /// 워크플로 병렬도 (1-48)
    pub workflow_parallelism: usize,
    /// 로그 상세 수준
    pub verbosity: Verbosity,
    /// 매니페스트 디렉토리가 이미 있으면 삭제
    pub delete_manifest_directory_if_present: bool,
    /// 심볼릭 링크 추적 여부
    pub follow_symlinks: bool,
    /// 문서 네임스페이스 URI의 고유 부분
    pub namespace_uri_unique_part: Option<String>,
    /// 문서 네임스페이스 URI 베이스
    pub namespace_uri_base: Option<String>,
}

impl Default for RuntimeConfiguration {
    fn default() -> Self {
        Self {
            workflow_parallelism: DEFAULT_PARALLELISM,
            verbosity: Verbosity::Warning,
            delete_manifest_directory_if_present: false,
            follow_symlinks: true,
            namespace_uri_unique_part: None,
            namespace_uri_base: None,
        }
    }
}

/// 구성이 검증되는 대상 동작 (action tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestToolAction {
    /// SBOM 생성
    Generate,
    /// 기존 SBOM 검증
    Validate,
}

impl fmt::Display for ManifestToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate => write!(f, "generate"),
            Self::Validate => write!(f, "validate"),
        }
    }
}

/// 생성 중 기록되는 내부 에러 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// 매니페스트에 없는 파일이 디스크에 있음
    AdditionalFile,
    /// 매니페스트의 파일이 디스크에 없음
    MissingFile,
    /// 해시 불일치
    InvalidHash,
    /// 지원하지 않는 해시 알고리즘
    UnsupportedHashAlgorithm,
    /// 매니페스트 폴더 관련 문제
    ManifestFolder,
    /// 루트 경로 필터에 의해 제외됨
    FilteredRootPath,
    /// 패키지 탐지/처리 실패
    PackageError,
    /// JSON 직렬화 실패
    JsonSerializationError,
    /// 기타
    Other,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdditionalFile => write!(f, "additional file"),
            Self::MissingFile => write!(f, "missing file"),
            Self::InvalidHash => write!(f, "invalid hash"),
            Self::UnsupportedHashAlgorithm => write!(f, "unsupported hash algorithm"),
            Self::ManifestFolder => write!(f, "manifest folder"),
            Self::FilteredRootPath => write!(f, "filtered root path"),
            Self::PackageError => write!(f, "package error"),
            Self::JsonSerializationError => write!(f, "json serialization error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// 내부 에러 레코드
///
/// 생성 워크플로가 텔레메트리 레코더에 기록하며, 호출 종료 시
/// [`EntityError`]로 변환되어 호출자에게 반환됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValidationResult {
    /// 에러 유형
    pub error_type: ErrorType,
    /// 관련 파일 경로 또는 패키지 식별자
    pub path: String,
}

impl FileValidationResult {
    /// 새 에러 레코드를 생성합니다.
    pub fn new(error_type: ErrorType, path: impl Into<String>) -> Self {
        Self {
            error_type,
            path: path.into(),
        }
    }
}

/// 호출자에게 노출되는 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityErrorType {
    /// 기타
    Other,
    /// 파일 관련 에러
    FileError,
    /// 패키지 관련 에러
    PackageError,
    /// JSON 직렬화 에러
    JsonSerializationError,
    /// 지원하지 않는 해시 알고리즘
    UnsupportedHashAlgorithm,
}

/// 에러가 발생한 대상
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    /// 파일
    File { path: String },
    /// 패키지
    Package { id: String, path: Option<String> },
}

/// 호출자용 에러 엔티티
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityError {
    /// 에러 분류
    pub error_type: EntityErrorType,
    /// 에러 대상
    pub entity: Entity,
    /// 상세 설명
    pub details: Option<String>,
}

impl From<&FileValidationResult> for EntityError {
    fn from(result: &FileValidationResult) -> Self {
        let file = || Entity::File {
            path: result.path.clone(),
        };
        let (error_type, entity) = match result.error_type {
            ErrorType::AdditionalFile
            | ErrorType::MissingFile
            | ErrorType::InvalidHash
            | ErrorType::ManifestFolder
            | ErrorType::FilteredRootPath => (EntityErrorType::FileError, file()),
            ErrorType::PackageError => (
                EntityErrorType::PackageError,
                Entity::Package {
                    id: result.path.clone(),
                    path: None,
                },
            ),
            ErrorType::JsonSerializationError => {
                (EntityErrorType::JsonSerializationError, file())
            }
            ErrorType::UnsupportedHashAlgorithm => {
                (EntityErrorType::UnsupportedHashAlgorithm, file())
            }
            ErrorType::Other => (EntityErrorType::Other, file()),
        };

        Self {
            error_type,
            entity,
            details: Some(result.error_type.to_string()),
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.entity {
            Entity::File { path } => path.as_str(),
            Entity::Package { id, .. } => id.as_str(),
        };
        write!(
            f,
            "{:?} {} ({})",
            self.error_type,
            target,
            self.details.as_deref().unwrap_or("no details"),
        )
    }
}

/// SBOM 생성 결과
///
/// `is_successful`은 워크플로가 반환한 값 그대로이며, `errors`가 비어 있지 않아도
/// 성공일 수 있습니다. 두 신호는 호출자가 함께 해석해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// 워크플로 성공 여부
    pub is_successful: bool,
    /// 기록 순서대로 정렬된 에러 목록
    pub errors: Vec<EntityError>,
}

impl GenerationResult {
    /// 새 생성 결과를 만듭니다.
    pub fn new(is_successful: bool, errors: Vec<EntityError>) -> Self {
        Self {
            is_successful,
            errors,
        }
    }

    /// 기록된 에러가 있는지 반환합니다.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// 호출 종료 시 싱크로 플러시되는 텔레메트리 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// 호출 고유 ID (UUID v4)
    pub run_id: String,
    /// 수행한 동작
    pub action: ManifestToolAction,
    /// 워크플로 성공 여부
    pub is_successful: bool,
    /// 워크플로 소요 시간 (밀리초)
    pub duration_ms: u64,
    /// 기록된 구성 스위치 (이름, 값)
    pub switches: Vec<(String, String)>,
    /// 기록된 에러 레코드 수
    pub error_count: usize,
    /// 기록된 예외 메시지
    pub exceptions: Vec<String>,
}
