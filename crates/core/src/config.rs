//! 설정 관리 — sbomkit.toml 파싱 및 런타임 설정
//!
//! [`SbomToolConfig`]는 로깅, 생성 기본값, 텔레메트리 설정을 담는 최상위 구조체입니다.
//! 생성 요청별 구성(`Configuration`)이 아니라 프로세스 전역의 기본값을 다룹니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`SBOMKIT_GENERATION_PARALLELISM=16` 형식)
//! 2. 설정 파일 (`sbomkit.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), sbomkit_core::error::SbomToolError> {
//! use sbomkit_core::config::SbomToolConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SbomToolConfig::load("sbomkit.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SbomToolConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, SbomToolError};
use crate::types::{
    AlgorithmName, DEFAULT_PARALLELISM, MAX_PARALLELISM, MIN_PARALLELISM, ManifestInfo,
    SbomSpecification, Verbosity,
};

/// sbomkit 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbomToolConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 생성 기본값
    #[serde(default)]
    pub generation: GenerationDefaults,
    /// 텔레메트리 설정
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl SbomToolConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SbomToolError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SbomToolError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SbomToolError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SbomToolError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SbomToolError> {
        toml::from_str(toml_str).map_err(|e| {
            SbomToolError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SBOMKIT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "SBOMKIT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SBOMKIT_GENERAL_LOG_FORMAT");

        // Generation
        override_string(
            &mut self.generation.default_specification,
            "SBOMKIT_GENERATION_DEFAULT_SPECIFICATION",
        );
        override_string(
            &mut self.generation.manifest_dir_name,
            "SBOMKIT_GENERATION_MANIFEST_DIR_NAME",
        );
        override_usize(
            &mut self.generation.parallelism,
            "SBOMKIT_GENERATION_PARALLELISM",
        );
        override_string(&mut self.generation.verbosity, "SBOMKIT_GENERATION_VERBOSITY");
        override_bool(
            &mut self.generation.follow_symlinks,
            "SBOMKIT_GENERATION_FOLLOW_SYMLINKS",
        );
        override_bool(
            &mut self.generation.delete_manifest_dir_if_present,
            "SBOMKIT_GENERATION_DELETE_MANIFEST_DIR_IF_PRESENT",
        );
        override_string(
            &mut self.generation.namespace_uri_base,
            "SBOMKIT_GENERATION_NAMESPACE_URI_BASE",
        );
        override_string(
            &mut self.generation.hash_algorithm,
            "SBOMKIT_GENERATION_HASH_ALGORITHM",
        );

        // Telemetry
        override_bool(&mut self.telemetry.enabled, "SBOMKIT_TELEMETRY_ENABLED");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SbomToolError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.generation.default_specification.parse::<SbomSpecification>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "generation.default_specification".to_owned(),
                reason: "must be in NAME:VERSION form, e.g. SPDX:2.2".to_owned(),
            }
            .into());
        }

        let dir_name = self.generation.manifest_dir_name.as_str();
        if dir_name.is_empty() || dir_name.contains(['/', '\\']) || dir_name == ".." {
            return Err(ConfigError::InvalidValue {
                field: "generation.manifest_dir_name".to_owned(),
                reason: "must be a single, non-empty path component".to_owned(),
            }
            .into());
        }

        if !(MIN_PARALLELISM..=MAX_PARALLELISM).contains(&self.generation.parallelism) {
            return Err(ConfigError::InvalidValue {
                field: "generation.parallelism".to_owned(),
                reason: format!("must be {MIN_PARALLELISM}-{MAX_PARALLELISM}"),
            }
            .into());
        }

        if Verbosity::from_str_loose(&self.generation.verbosity).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "generation.verbosity".to_owned(),
                reason: "must be one of: verbose, debug, information, warning, error, fatal"
                    .to_owned(),
            }
            .into());
        }

        if AlgorithmName::from_str_loose(&self.generation.hash_algorithm).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "generation.hash_algorithm".to_owned(),
                reason: "must be one of: SHA1, SHA256, SHA512, MD5".to_owned(),
            }
            .into());
        }

        // sanitizer가 채우는 형태(후행 '/' 제거)로 검사
        let base = self
            .generation
            .namespace_uri_base
            .trim()
            .trim_end_matches(|c: char| c == '/' || c.is_whitespace());
        let parsed = url::Url::parse(base).map_err(|e| ConfigError::InvalidValue {
            field: "generation.namespace_uri_base".to_owned(),
            reason: format!("'{base}' is not a valid URI: {e}"),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "generation.namespace_uri_base".to_owned(),
                reason: "must be an absolute http(s) URI".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 생성 기본값
///
/// 호출자가 지정하지 않은 구성 필드를 sanitizer가 채울 때 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    /// 명세를 지정하지 않았을 때 사용할 형식 (`NAME:VERSION`)
    pub default_specification: String,
    /// 매니페스트 디렉토리 이름
    pub manifest_dir_name: String,
    /// 워크플로 병렬도
    pub parallelism: usize,
    /// 로그 상세 수준
    pub verbosity: String,
    /// 심볼릭 링크 추적 여부
    pub follow_symlinks: bool,
    /// 기존 매니페스트 디렉토리 삭제 여부
    pub delete_manifest_dir_if_present: bool,
    /// 문서 네임스페이스 URI 베이스
    pub namespace_uri_base: String,
    /// 기본 해시 알고리즘
    pub hash_algorithm: String,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            default_specification: "SPDX:2.2".to_owned(),
            manifest_dir_name: "_manifest".to_owned(),
            parallelism: DEFAULT_PARALLELISM,
            verbosity: "warning".to_owned(),
            follow_symlinks: true,
            delete_manifest_dir_if_present: false,
            namespace_uri_base: "https://spdx.org/spdxdocs/sbomkit".to_owned(),
            hash_algorithm: "SHA256".to_owned(),
        }
    }
}

impl GenerationDefaults {
    /// 기본 명세를 [`ManifestInfo`]로 반환합니다.
    ///
    /// 검증되지 않은 값이면 `SPDX:2.2`로 대체합니다.
    pub fn default_manifest_info(&self) -> ManifestInfo {
        self.default_specification
            .parse::<SbomSpecification>()
            .map(|spec| spec.to_manifest_info())
            .unwrap_or_else(|_| ManifestInfo::new("SPDX", "2.2"))
    }

    /// 기본 해시 알고리즘을 반환합니다 (파싱 실패 시 SHA-256).
    pub fn default_hash_algorithm(&self) -> AlgorithmName {
        AlgorithmName::from_str_loose(&self.hash_algorithm).unwrap_or(AlgorithmName::Sha256)
    }

    /// 기본 상세 수준을 반환합니다 (파싱 실패 시 warning).
    pub fn default_verbosity(&self) -> Verbosity {
        Verbosity::from_str_loose(&self.verbosity).unwrap_or_default()
    }
}

/// 텔레메트리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// 활성화 여부 (비활성화 시 레코드는 버려짐)
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
