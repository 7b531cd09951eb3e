//! 구성 정규화 -- 검증을 통과한 구성의 값을 다듬고 기본값을 채움
//!
//! [`ConfigSanitizer::sanitize`]는 실패하지 않으며 멱등입니다.
//! 같은 구성에 두 번 적용해도 첫 번째 결과와 같습니다.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use sbomkit_core::ManifestToolAction;
use sbomkit_core::config::GenerationDefaults;

use super::{Configuration, Setting, SettingSource};

/// 구성 정규화기
///
/// 설정 파일의 `[generation]` 기본값으로 비어 있는 필드를 채웁니다.
/// 채워진 값의 출처는 [`SettingSource::Default`]입니다.
#[derive(Debug, Clone, Default)]
pub struct ConfigSanitizer {
    defaults: GenerationDefaults,
}

impl ConfigSanitizer {
    /// 기본값 묶음으로 새 정규화기를 생성합니다.
    pub fn new(defaults: GenerationDefaults) -> Self {
        Self { defaults }
    }

    /// 사용 중인 기본값을 반환합니다.
    pub fn defaults(&self) -> &GenerationDefaults {
        &self.defaults
    }

    /// 구성을 제자리에서 정규화합니다.
    pub fn sanitize(&self, config: &mut Configuration) {
        for text in [
            &mut config.package_name,
            &mut config.package_version,
            &mut config.package_supplier,
            &mut config.build_environment_name,
            &mut config.build_name,
            &mut config.build_id,
            &mut config.commit_id,
            &mut config.branch,
            &mut config.repository_uri,
            &mut config.namespace_uri_base,
            &mut config.namespace_uri_unique_part,
            &mut config.generation_timestamp,
        ] {
            trim_text(text);
        }

        for path in [
            &mut config.build_drop_path,
            &mut config.build_component_path,
            &mut config.manifest_dir_path,
            &mut config.external_document_reference_list_file,
        ] {
            absolutize(path);
        }

        self.sanitize_manifest_dir(config);
        self.sanitize_manifest_info(config);

        fill(&mut config.hash_algorithm, || {
            self.defaults.default_hash_algorithm()
        });
        fill(&mut config.parallelism, || self.defaults.parallelism);
        fill(&mut config.verbosity, || self.defaults.default_verbosity());
        fill(&mut config.follow_symlinks, || {
            self.defaults.follow_symlinks
        });
        fill(&mut config.delete_manifest_dir_if_present, || {
            self.defaults.delete_manifest_dir_if_present
        });

        if let Some(base) = config.namespace_uri_base.as_mut() {
            base.value = trim_trailing_slashes(&base.value).to_owned();
        }
        trim_text(&mut config.namespace_uri_base);
        fill(&mut config.namespace_uri_base, || {
            trim_trailing_slashes(self.defaults.namespace_uri_base.trim()).to_owned()
        });

        fill(&mut config.namespace_uri_unique_part, || {
            uuid::Uuid::new_v4().to_string()
        });
        fill(&mut config.generation_timestamp, || {
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        });

        debug!(
            manifest_dir = ?config.manifest_dir_path(),
            specifications = config.manifest_infos().len(),
            "configuration sanitized"
        );
    }

    fn sanitize_manifest_dir(&self, config: &mut Configuration) {
        let dir_name = self.defaults.manifest_dir_name.as_str();

        if let Some(dir) = config.manifest_dir_path.as_mut() {
            if config.manifest_tool_action == ManifestToolAction::Generate
                && dir.value.file_name().and_then(|n| n.to_str()) != Some(dir_name)
            {
                dir.value.push(dir_name);
            }
        } else if let Some(root) = config.build_drop_path.as_ref() {
            config.manifest_dir_path = Some(Setting::default_value(root.value.join(dir_name)));
        }
    }

    fn sanitize_manifest_info(&self, config: &mut Configuration) {
        let Some(infos) = config
            .manifest_info
            .as_mut()
            .filter(|infos| !infos.value.is_empty())
        else {
            config.manifest_info = Some(Setting::default_value(vec![
                self.defaults.default_manifest_info(),
            ]));
            return;
        };

        let mut unique = Vec::with_capacity(infos.value.len());
        for info in infos.value.drain(..) {
            if !unique.contains(&info) {
                unique.push(info);
            }
        }
        infos.value = unique;
    }
}

fn fill<T>(setting: &mut Option<Setting<T>>, default: impl FnOnce() -> T) {
    if setting.is_none() {
        *setting = Some(Setting {
            value: default(),
            source: SettingSource::Default,
        });
    }
}

fn trim_text(setting: &mut Option<Setting<String>>) {
    let Some(current) = setting.as_mut() else {
        return;
    };
    let trimmed = current.value.trim();
    if trimmed.is_empty() {
        *setting = None;
    } else if trimmed.len() != current.value.len() {
        current.value = trimmed.to_owned();
    }
}

fn trim_trailing_slashes(uri: &str) -> &str {
    uri.trim_end_matches(|c: char| c == '/' || c.is_whitespace())
}

fn absolutize(setting: &mut Option<Setting<PathBuf>>) {
    let Some(current) = setting.as_mut() else {
        return;
    };
    if current.value.to_string_lossy().trim().is_empty() {
        *setting = None;
        return;
    }
    if current.value.is_absolute() {
        return;
    }
    match std::path::absolute(&current.value) {
        Ok(absolute) => current.value = absolute,
        Err(e) => {
            debug!(path = %current.value.display(), error = %e, "could not make path absolute");
        }
    }
}
