//! 생성 요청 -- 호출자 입력 묶음
//!
//! [`GenerationRequest`]는 [`SbomGenerator::generate`](crate::SbomGenerator::generate)에
//! 전달되는 모든 입력을 담습니다. 필수 입력(루트 경로, 컴포넌트 경로)은 생성자에서,
//! 나머지는 빌더 스타일 setter로 지정합니다.
//!
//! # 사용 예시
//!
//! ```
//! use sbomkit_api::GenerationRequest;
//! use sbomkit_core::{SbomMetadata, SbomSpecification};
//!
//! let request = GenerationRequest::new("/build/drop", "/build/drop/component")
//!     .metadata(SbomMetadata {
//!         package_name: Some("demo".to_owned()),
//!         package_version: Some("1.0.0".to_owned()),
//!         ..SbomMetadata::default()
//!     })
//!     .specifications(vec![SbomSpecification::new("SPDX", "2.2")]);
//!
//! assert_eq!(request.specifications.len(), 1);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use sbomkit_core::{RuntimeConfiguration, SbomMetadata, SbomSpecification};

/// SBOM 생성 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// 스캔 루트 디렉토리 (빌드 드롭 경로)
    pub root_path: PathBuf,
    /// 루트 내 컴포넌트 디렉토리
    pub component_path: PathBuf,
    /// 매니페스트 메타데이터 (필수, 미설정 시 `InvalidArgument`)
    #[serde(default)]
    pub metadata: Option<SbomMetadata>,
    /// 요청 명세 목록 (비어 있으면 설정 기본값 사용)
    #[serde(default)]
    pub specifications: Vec<SbomSpecification>,
    /// 런타임 옵션 (미설정 시 설정 기본값 사용)
    #[serde(default)]
    pub runtime_configuration: Option<RuntimeConfiguration>,
    /// 매니페스트 출력 디렉토리
    #[serde(default)]
    pub manifest_dir_path: Option<PathBuf>,
    /// 외부 문서 참조 목록 파일
    #[serde(default)]
    pub external_document_reference_list_file: Option<PathBuf>,
}

impl GenerationRequest {
    /// 필수 경로로 새 요청을 생성합니다.
    pub fn new(root_path: impl Into<PathBuf>, component_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            component_path: component_path.into(),
            metadata: None,
            specifications: Vec::new(),
            runtime_configuration: None,
            manifest_dir_path: None,
            external_document_reference_list_file: None,
        }
    }

    /// 매니페스트 메타데이터를 지정합니다.
    pub fn metadata(mut self, metadata: SbomMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// 요청 명세 목록을 지정합니다.
    pub fn specifications(mut self, specifications: Vec<SbomSpecification>) -> Self {
        self.specifications = specifications;
        self
    }

    /// 런타임 옵션을 지정합니다.
    pub fn runtime_configuration(mut self, runtime: RuntimeConfiguration) -> Self {
        self.runtime_configuration = Some(runtime);
        self
    }

    /// 매니페스트 출력 디렉토리를 지정합니다.
    pub fn manifest_dir_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_dir_path = Some(path.into());
        self
    }

    /// 외부 문서 참조 목록 파일을 지정합니다.
    pub fn external_document_reference_list_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.external_document_reference_list_file = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_has_no_optional_inputs() {
        let request = GenerationRequest::new("/root", "/root/component");
        assert_eq!(request.root_path, PathBuf::from("/root"));
        assert!(request.metadata.is_none());
        assert!(request.specifications.is_empty());
        assert!(request.runtime_configuration.is_none());
        assert!(request.manifest_dir_path.is_none());
    }

    #[test]
    fn setters_fill_optional_inputs() {
        let request = GenerationRequest::new("/root", "/root/component")
            .metadata(SbomMetadata::default())
            .runtime_configuration(RuntimeConfiguration::default())
            .manifest_dir_path("/out")
            .external_document_reference_list_file("/refs.txt");
        assert!(request.metadata.is_some());
        assert!(request.runtime_configuration.is_some());
        assert_eq!(request.manifest_dir_path, Some(PathBuf::from("/out")));
        assert_eq!(
            request.external_document_reference_list_file,
            Some(PathBuf::from("/refs.txt"))
        );
    }

    #[test]
    fn deserializes_from_json_with_defaults() {
        let json = r#"{"root_path":"/root","component_path":"/root/c"}"#;
        let request: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.component_path, PathBuf::from("/root/c"));
        assert!(request.metadata.is_none());
    }
}
