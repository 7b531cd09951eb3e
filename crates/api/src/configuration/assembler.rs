//! 구성 조립기 -- 호출 입력을 [`Configuration`]으로 변환

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use sbomkit_core::types::{MAX_PARALLELISM, MIN_PARALLELISM};
use sbomkit_core::{ManifestInfo, ManifestToolAction, RuntimeConfiguration, SbomMetadata};

use super::{Configuration, Setting};
use crate::error::GeneratorError;
use crate::request::GenerationRequest;

/// 생성 요청을 구성으로 조립합니다.
///
/// 필수 입력 누락은 검증기 실행 전에 `InvalidArgument`로 거부됩니다.
/// 호출자가 지정하지 않은 선택 필드는 비워 두며, 기본값은 sanitizer가 채웁니다.
pub struct ConfigurationAssembler;

impl ConfigurationAssembler {
    /// 요청에서 `generate` 동작의 구성을 만듭니다.
    ///
    /// # Errors
    ///
    /// - 루트 경로 또는 컴포넌트 경로가 비어 있음
    /// - 메타데이터가 없음
    /// - 명세 중 이름이나 버전이 비어 있는 항목이 있음
    pub fn build(request: GenerationRequest) -> Result<Configuration, GeneratorError> {
        require_path(&request.root_path, "root_path")?;
        require_path(&request.component_path, "component_path")?;
        let metadata = request.metadata.ok_or_else(|| GeneratorError::InvalidArgument {
            argument: "metadata".to_owned(),
            reason: "manifest metadata is required".to_owned(),
        })?;

        let mut config = Configuration::new(ManifestToolAction::Generate);
        config.build_drop_path = Some(Setting::api(request.root_path));
        config.build_component_path = Some(Setting::api(request.component_path));
        config.manifest_dir_path = non_blank_path(request.manifest_dir_path);
        config.external_document_reference_list_file =
            non_blank_path(request.external_document_reference_list_file);

        apply_metadata(&mut config, metadata);

        if !request.specifications.is_empty() {
            let infos = request
                .specifications
                .iter()
                .map(|spec| {
                    if spec.is_blank() {
                        return Err(GeneratorError::InvalidArgument {
                            argument: "specifications".to_owned(),
                            reason: format!("specification '{spec}' has a blank name or version"),
                        });
                    }
                    Ok(spec.to_manifest_info())
                })
                .collect::<Result<Vec<ManifestInfo>, _>>()?;
            config.manifest_info = Some(Setting::api(infos));
        }

        if let Some(runtime) = request.runtime_configuration {
            apply_runtime(&mut config, runtime);
        }

        debug!(
            root = %request_path(&config.build_drop_path),
            specifications = config.manifest_infos().len(),
            "configuration assembled"
        );

        Ok(config)
    }
}

fn require_path(path: &Path, argument: &str) -> Result<(), GeneratorError> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        return Err(GeneratorError::InvalidArgument {
            argument: argument.to_owned(),
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(())
}

fn non_blank_path(path: Option<PathBuf>) -> Option<Setting<PathBuf>> {
    path.filter(|p| !p.to_string_lossy().trim().is_empty())
        .map(Setting::api)
}

fn request_path(setting: &Option<Setting<PathBuf>>) -> String {
    setting
        .as_ref()
        .map(|s| s.value.display().to_string())
        .unwrap_or_default()
}

fn apply_metadata(config: &mut Configuration, metadata: SbomMetadata) {
    config.build_environment_name = metadata.build_environment_name.map(Setting::api);
    config.build_name = metadata.build_name.map(Setting::api);
    config.build_id = metadata.build_id.map(Setting::api);
    config.commit_id = metadata.commit_id.map(Setting::api);
    config.branch = metadata.branch.map(Setting::api);
    config.repository_uri = metadata.repository_uri.map(Setting::api);
    config.package_name = metadata.package_name.map(Setting::api);
    config.package_version = metadata.package_version.map(Setting::api);
    config.package_supplier = metadata.package_supplier.map(Setting::api);
}

fn apply_runtime(config: &mut Configuration, runtime: RuntimeConfiguration) {
    let parallelism = runtime.workflow_parallelism;
    if (MIN_PARALLELISM..=MAX_PARALLELISM).contains(&parallelism) {
        config.parallelism = Some(Setting::api(parallelism));
    } else {
        warn!(
            parallelism,
            min = MIN_PARALLELISM,
            max = MAX_PARALLELISM,
            "workflow parallelism out of range, using default"
        );
    }

    config.verbosity = Some(Setting::api(runtime.verbosity));
    config.follow_symlinks = Some(Setting::api(runtime.follow_symlinks));
    config.delete_manifest_dir_if_present =
        Some(Setting::api(runtime.delete_manifest_directory_if_present));
    config.namespace_uri_base = runtime.namespace_uri_base.map(Setting::api);
    config.namespace_uri_unique_part = runtime.namespace_uri_unique_part.map(Setting::api);
}
