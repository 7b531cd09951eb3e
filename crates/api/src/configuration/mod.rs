//! 생성 구성 -- 호출 단위로 조립, 검증, 정규화되는 설정 묶음
//!
//! 한 번의 생성 호출은 다음 순서로 [`Configuration`]을 다룹니다.
//!
//! ```text
//! GenerationRequest --> ConfigurationAssembler --> Configuration
//!                                                       |
//!                                         ValidatorSet (schema sweep)
//!                                                       |
//!                                               ConfigSanitizer
//!                                                       |
//!                                   Configuration::finalize --> FinalizedConfiguration
//! ```
//!
//! 각 필드는 [`Setting`]으로 감싸져 호출자가 지정한 값인지
//! 기본값으로 채워진 값인지를 기록합니다.

pub mod assembler;
pub mod sanitizer;
pub mod schema;

use std::ops::Deref;
use std::path::{Path, PathBuf};

use serde::Serialize;

use sbomkit_core::{AlgorithmName, ManifestInfo, ManifestToolAction, Verbosity};

pub use assembler::ConfigurationAssembler;
pub use sanitizer::ConfigSanitizer;
pub use schema::{
    CONFIGURATION_SCHEMA, Constraint, ConstraintKind, FieldAttributes, FieldDescriptor,
    FieldFormat, FieldId, FieldValue, ScopedConstraint,
};

/// 설정 값의 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingSource {
    /// 호출자가 API로 지정
    Api,
    /// sanitizer가 기본값으로 채움
    Default,
}

/// 출처가 기록된 설정 값
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting<T> {
    /// 값
    pub value: T,
    /// 출처
    pub source: SettingSource,
}

impl<T> Setting<T> {
    /// 호출자가 지정한 값을 만듭니다.
    pub fn api(value: T) -> Self {
        Self {
            value,
            source: SettingSource::Api,
        }
    }

    /// 기본값으로 채운 값을 만듭니다.
    pub fn default_value(value: T) -> Self {
        Self {
            value,
            source: SettingSource::Default,
        }
    }
}

/// 생성 호출 하나의 구성
///
/// 호출마다 새로 만들어지고, 검증기와 sanitizer를 거친 뒤
/// [`finalize`](Self::finalize)로 읽기 전용이 됩니다.
/// 동작 태그(`manifest_tool_action`)는 항상 정확히 하나입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub build_drop_path: Option<Setting<PathBuf>>,
    pub build_component_path: Option<Setting<PathBuf>>,
    pub manifest_dir_path: Option<Setting<PathBuf>>,
    pub external_document_reference_list_file: Option<Setting<PathBuf>>,
    pub package_name: Option<Setting<String>>,
    pub package_version: Option<Setting<String>>,
    pub package_supplier: Option<Setting<String>>,
    pub build_environment_name: Option<Setting<String>>,
    pub build_name: Option<Setting<String>>,
    pub build_id: Option<Setting<String>>,
    pub commit_id: Option<Setting<String>>,
    pub branch: Option<Setting<String>>,
    pub repository_uri: Option<Setting<String>>,
    pub manifest_info: Option<Setting<Vec<ManifestInfo>>>,
    pub parallelism: Option<Setting<usize>>,
    pub verbosity: Option<Setting<Verbosity>>,
    pub follow_symlinks: Option<Setting<bool>>,
    pub delete_manifest_dir_if_present: Option<Setting<bool>>,
    pub namespace_uri_base: Option<Setting<String>>,
    pub namespace_uri_unique_part: Option<Setting<String>>,
    pub hash_algorithm: Option<Setting<AlgorithmName>>,
    pub generation_timestamp: Option<Setting<String>>,
    pub manifest_tool_action: ManifestToolAction,
}

impl Configuration {
    /// 모든 필드가 비어 있는 구성을 만듭니다.
    pub fn new(action: ManifestToolAction) -> Self {
        Self {
            build_drop_path: None,
            build_component_path: None,
            manifest_dir_path: None,
            external_document_reference_list_file: None,
            package_name: None,
            package_version: None,
            package_supplier: None,
            build_environment_name: None,
            build_name: None,
            build_id: None,
            commit_id: None,
            branch: None,
            repository_uri: None,
            manifest_info: None,
            parallelism: None,
            verbosity: None,
            follow_symlinks: None,
            delete_manifest_dir_if_present: None,
            namespace_uri_base: None,
            namespace_uri_unique_part: None,
            hash_algorithm: None,
            generation_timestamp: None,
            manifest_tool_action: action,
        }
    }

    /// 스키마 필드의 현재 값을 반환합니다.
    pub fn field_value(&self, id: FieldId) -> FieldValue<'_> {
        match id {
            FieldId::BuildDropPath => FieldValue::path(&self.build_drop_path),
            FieldId::BuildComponentPath => FieldValue::path(&self.build_component_path),
            FieldId::ManifestDirPath => FieldValue::path(&self.manifest_dir_path),
            FieldId::ExternalDocumentReferenceListFile => {
                FieldValue::path(&self.external_document_reference_list_file)
            }
            FieldId::PackageName => FieldValue::text(&self.package_name),
            FieldId::PackageVersion => FieldValue::text(&self.package_version),
            FieldId::PackageSupplier => FieldValue::text(&self.package_supplier),
            FieldId::BuildEnvironmentName => FieldValue::text(&self.build_environment_name),
            FieldId::BuildName => FieldValue::text(&self.build_name),
            FieldId::BuildId => FieldValue::text(&self.build_id),
            FieldId::CommitId => FieldValue::text(&self.commit_id),
            FieldId::Branch => FieldValue::text(&self.branch),
            FieldId::RepositoryUri => FieldValue::text(&self.repository_uri),
            FieldId::ManifestInfo => self
                .manifest_info
                .as_ref()
                .map_or(FieldValue::Unset, |s| FieldValue::Manifests(&s.value)),
            FieldId::Parallelism => self.parallelism.as_ref().map_or(FieldValue::Unset, |s| {
                FieldValue::Integer(i64::try_from(s.value).unwrap_or(i64::MAX))
            }),
            FieldId::Verbosity => self
                .verbosity
                .as_ref()
                .map_or(FieldValue::Unset, |s| FieldValue::Verbosity(s.value)),
            FieldId::FollowSymlinks => FieldValue::flag(&self.follow_symlinks),
            FieldId::DeleteManifestDirIfPresent => {
                FieldValue::flag(&self.delete_manifest_dir_if_present)
            }
            FieldId::NamespaceUriBase => FieldValue::text(&self.namespace_uri_base),
            FieldId::NamespaceUriUniquePart => FieldValue::text(&self.namespace_uri_unique_part),
            FieldId::HashAlgorithm => self
                .hash_algorithm
                .as_ref()
                .map_or(FieldValue::Unset, |s| FieldValue::Algorithm(s.value)),
            FieldId::GenerationTimestamp => FieldValue::text(&self.generation_timestamp),
            FieldId::ManifestToolAction => FieldValue::Action(self.manifest_tool_action),
        }
    }

    /// 루트 경로
    pub fn build_drop_path(&self) -> Option<&Path> {
        self.build_drop_path.as_ref().map(|s| s.value.as_path())
    }

    /// 컴포넌트 경로
    pub fn build_component_path(&self) -> Option<&Path> {
        self.build_component_path.as_ref().map(|s| s.value.as_path())
    }

    /// 매니페스트 출력 디렉토리
    pub fn manifest_dir_path(&self) -> Option<&Path> {
        self.manifest_dir_path.as_ref().map(|s| s.value.as_path())
    }

    /// 생성할 매니페스트 형식 목록
    pub fn manifest_infos(&self) -> &[ManifestInfo] {
        self.manifest_info
            .as_ref()
            .map(|s| s.value.as_slice())
            .unwrap_or(&[])
    }

    /// 구성을 읽기 전용으로 확정합니다.
    pub fn finalize(self) -> FinalizedConfiguration {
        FinalizedConfiguration(self)
    }
}

/// 검증과 정규화를 마친 읽기 전용 구성
///
/// [`Configuration::finalize`]로만 만들 수 있으며, 워크플로에는 이 타입만 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedConfiguration(Configuration);

impl Deref for FinalizedConfiguration {
    type Target = Configuration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_configuration_is_empty_except_action() {
        let config = Configuration::new(ManifestToolAction::Generate);
        assert_eq!(config.manifest_tool_action, ManifestToolAction::Generate);
        assert!(config.build_drop_path().is_none());
        assert!(config.manifest_infos().is_empty());
        assert!(matches!(
            config.field_value(FieldId::BuildDropPath),
            FieldValue::Unset
        ));
        assert!(matches!(
            config.field_value(FieldId::ManifestToolAction),
            FieldValue::Action(ManifestToolAction::Generate)
        ));
    }

    #[test]
    fn field_value_reflects_settings() {
        let mut config = Configuration::new(ManifestToolAction::Generate);
        config.build_drop_path = Some(Setting::api(PathBuf::from("/drop")));
        config.parallelism = Some(Setting::api(12));
        config.package_name = Some(Setting::api("demo".to_owned()));

        assert!(matches!(
            config.field_value(FieldId::BuildDropPath),
            FieldValue::Path(p) if p == Path::new("/drop")
        ));
        assert!(matches!(
            config.field_value(FieldId::Parallelism),
            FieldValue::Integer(12)
        ));
        assert!(matches!(
            config.field_value(FieldId::PackageName),
            FieldValue::Text("demo")
        ));
    }

    #[test]
    fn finalized_configuration_derefs_to_inner() {
        let mut config = Configuration::new(ManifestToolAction::Generate);
        config.manifest_info = Some(Setting::default_value(vec![ManifestInfo::new(
            "SPDX", "2.2",
        )]));
        let finalized = config.finalize();
        assert_eq!(finalized.manifest_infos().len(), 1);
        assert_eq!(
            finalized.manifest_info.as_ref().map(|s| s.source),
            Some(SettingSource::Default)
        );
    }
}
