//! 구성 스키마 -- 검증 대상 필드와 제약 조건의 명시적 목록
//!
//! [`CONFIGURATION_SCHEMA`]는 검증기 sweep이 순회하는 필드를 선언 순서대로 나열합니다.
//! 각 필드의 [`FieldAttributes`]는 형식 힌트와 동작별 제약 조건을 가지며,
//! 검증기는 자신이 담당하는 제약이 현재 동작에 적용될 때만 값을 검사합니다.

use std::fmt;
use std::path::Path;

use sbomkit_core::types::{MAX_PARALLELISM, MIN_PARALLELISM};
use sbomkit_core::{AlgorithmName, ManifestInfo, ManifestToolAction, Verbosity};

use super::Setting;

/// 스키마 필드 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    BuildDropPath,
    BuildComponentPath,
    ManifestDirPath,
    ExternalDocumentReferenceListFile,
    PackageName,
    PackageVersion,
    PackageSupplier,
    BuildEnvironmentName,
    BuildName,
    BuildId,
    CommitId,
    Branch,
    RepositoryUri,
    ManifestInfo,
    Parallelism,
    Verbosity,
    FollowSymlinks,
    DeleteManifestDirIfPresent,
    NamespaceUriBase,
    NamespaceUriUniquePart,
    HashAlgorithm,
    GenerationTimestamp,
    ManifestToolAction,
}

impl FieldId {
    /// 에러 메시지와 메트릭 라벨에 쓰이는 필드 이름
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildDropPath => "build_drop_path",
            Self::BuildComponentPath => "build_component_path",
            Self::ManifestDirPath => "manifest_dir_path",
            Self::ExternalDocumentReferenceListFile => "external_document_reference_list_file",
            Self::PackageName => "package_name",
            Self::PackageVersion => "package_version",
            Self::PackageSupplier => "package_supplier",
            Self::BuildEnvironmentName => "build_environment_name",
            Self::BuildName => "build_name",
            Self::BuildId => "build_id",
            Self::CommitId => "commit_id",
            Self::Branch => "branch",
            Self::RepositoryUri => "repository_uri",
            Self::ManifestInfo => "manifest_info",
            Self::Parallelism => "parallelism",
            Self::Verbosity => "verbosity",
            Self::FollowSymlinks => "follow_symlinks",
            Self::DeleteManifestDirIfPresent => "delete_manifest_dir_if_present",
            Self::NamespaceUriBase => "namespace_uri_base",
            Self::NamespaceUriUniquePart => "namespace_uri_unique_part",
            Self::HashAlgorithm => "hash_algorithm",
            Self::GenerationTimestamp => "generation_timestamp",
            Self::ManifestToolAction => "manifest_tool_action",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 필드 값의 형식 힌트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Path,
    DirectoryPath,
    FilePath,
    Uri,
    Integer,
    Flag,
    Text,
    List,
    Enum,
}

/// 제약 조건 종류 (검증기와 1:1 대응)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    ValueRequired,
    DirectoryExists,
    DirectoryWritable,
    FileExists,
    IntRange,
    Uri,
}

/// 필드 제약 조건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// 값이 존재하고 비어 있지 않아야 함
    ValueRequired,
    /// 존재하는 디렉토리여야 함
    DirectoryExists,
    /// 쓰기 가능한 디렉토리여야 함
    DirectoryWritable,
    /// 존재하는 일반 파일이어야 함
    FileExists,
    /// 포함 범위 안의 정수여야 함
    IntRange { min: i64, max: i64 },
    /// 절대 URI여야 함
    Uri,
}

impl Constraint {
    /// 제약 조건 종류를 반환합니다.
    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::ValueRequired => ConstraintKind::ValueRequired,
            Self::DirectoryExists => ConstraintKind::DirectoryExists,
            Self::DirectoryWritable => ConstraintKind::DirectoryWritable,
            Self::FileExists => ConstraintKind::FileExists,
            Self::IntRange { .. } => ConstraintKind::IntRange,
            Self::Uri => ConstraintKind::Uri,
        }
    }
}

/// 적용 동작이 지정된 제약 조건
///
/// `actions`가 비어 있으면 모든 동작에 적용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedConstraint {
    pub constraint: Constraint,
    pub actions: &'static [ManifestToolAction],
}

impl ScopedConstraint {
    /// 주어진 동작에 이 제약이 적용되는지 확인합니다.
    pub fn applies_to(&self, action: ManifestToolAction) -> bool {
        self.actions.is_empty() || self.actions.contains(&action)
    }
}

/// 필드 속성 (형식 힌트 + 제약 조건)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAttributes {
    pub format: FieldFormat,
    pub constraints: &'static [ScopedConstraint],
}

impl FieldAttributes {
    /// 현재 동작에 적용되는 해당 종류의 제약을 찾습니다.
    pub fn constraint_for(
        &self,
        kind: ConstraintKind,
        action: ManifestToolAction,
    ) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.constraint.kind() == kind && c.applies_to(action))
            .map(|c| &c.constraint)
    }

    /// 현재 동작에서 필수 필드인지 확인합니다.
    pub fn is_required(&self, action: ManifestToolAction) -> bool {
        self.constraint_for(ConstraintKind::ValueRequired, action)
            .is_some()
    }
}

/// 스키마의 필드 하나 (이름, 속성, 값 접근자)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub attributes: FieldAttributes,
}

impl FieldDescriptor {
    /// 필드 이름
    pub const fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// 구성에서 이 필드의 현재 값을 읽습니다.
    pub fn value<'a>(&self, config: &'a super::Configuration) -> FieldValue<'a> {
        config.field_value(self.id)
    }
}

/// 검증기에 전달되는 필드 값의 읽기 전용 뷰
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Unset,
    Path(&'a Path),
    Text(&'a str),
    Integer(i64),
    Flag(bool),
    Manifests(&'a [ManifestInfo]),
    Verbosity(Verbosity),
    Algorithm(AlgorithmName),
    Action(ManifestToolAction),
}

impl<'a> FieldValue<'a> {
    pub(crate) fn path<P: AsRef<Path>>(setting: &'a Option<Setting<P>>) -> Self {
        setting
            .as_ref()
            .map_or(Self::Unset, |s| Self::Path(s.value.as_ref()))
    }

    pub(crate) fn text(setting: &'a Option<Setting<String>>) -> Self {
        setting
            .as_ref()
            .map_or(Self::Unset, |s| Self::Text(s.value.as_str()))
    }

    pub(crate) fn flag(setting: &Option<Setting<bool>>) -> Self {
        setting.as_ref().map_or(Self::Unset, |s| Self::Flag(s.value))
    }

    /// 값이 없는지 확인합니다.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// 값이 없거나 비어 있는지 확인합니다 (공백 문자열, 빈 경로, 빈 목록).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Unset => true,
            Self::Path(p) => p.as_os_str().is_empty(),
            Self::Text(s) => s.trim().is_empty(),
            Self::Manifests(list) => list.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "<unset>"),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Manifests(list) => {
                let names: Vec<String> = list.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", names.join(", "))
            }
            Self::Verbosity(v) => write!(f, "{v}"),
            Self::Algorithm(a) => write!(f, "{a}"),
            Self::Action(a) => write!(f, "{a}"),
        }
    }
}

// --- 스키마 정의 ---

const ALL_ACTIONS: &[ManifestToolAction] = &[];
const GENERATE: &[ManifestToolAction] = &[ManifestToolAction::Generate];
const VALIDATE: &[ManifestToolAction] = &[ManifestToolAction::Validate];

const fn scoped(
    constraint: Constraint,
    actions: &'static [ManifestToolAction],
) -> ScopedConstraint {
    ScopedConstraint {
        constraint,
        actions,
    }
}

const fn field(
    id: FieldId,
    format: FieldFormat,
    constraints: &'static [ScopedConstraint],
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        attributes: FieldAttributes {
            format,
            constraints,
        },
    }
}

const NONE: &[ScopedConstraint] = &[];

const BUILD_DROP_PATH: &[ScopedConstraint] = &[
    scoped(Constraint::ValueRequired, ALL_ACTIONS),
    scoped(Constraint::DirectoryExists, ALL_ACTIONS),
    scoped(Constraint::DirectoryWritable, GENERATE),
];

const BUILD_COMPONENT_PATH: &[ScopedConstraint] = &[
    scoped(Constraint::ValueRequired, GENERATE),
    scoped(Constraint::DirectoryExists, ALL_ACTIONS),
];

const MANIFEST_DIR_PATH: &[ScopedConstraint] = &[
    scoped(Constraint::DirectoryExists, VALIDATE),
    scoped(Constraint::DirectoryWritable, GENERATE),
];

const EXISTING_FILE: &[ScopedConstraint] = &[scoped(Constraint::FileExists, ALL_ACTIONS)];

const URI: &[ScopedConstraint] = &[scoped(Constraint::Uri, ALL_ACTIONS)];

const PARALLELISM: &[ScopedConstraint] = &[scoped(
    Constraint::IntRange {
        min: MIN_PARALLELISM as i64,
        max: MAX_PARALLELISM as i64,
    },
    ALL_ACTIONS,
)];

const REQUIRED: &[ScopedConstraint] = &[scoped(Constraint::ValueRequired, ALL_ACTIONS)];

/// 검증 대상 필드 목록 (sweep 순서)
pub static CONFIGURATION_SCHEMA: &[FieldDescriptor] = &[
    field(FieldId::BuildDropPath, FieldFormat::DirectoryPath, BUILD_DROP_PATH),
    field(
        FieldId::BuildComponentPath,
        FieldFormat::DirectoryPath,
        BUILD_COMPONENT_PATH,
    ),
    field(
        FieldId::ManifestDirPath,
        FieldFormat::DirectoryPath,
        MANIFEST_DIR_PATH,
    ),
    field(
        FieldId::ExternalDocumentReferenceListFile,
        FieldFormat::FilePath,
        EXISTING_FILE,
    ),
    field(FieldId::PackageName, FieldFormat::Text, NONE),
    field(FieldId::PackageVersion, FieldFormat::Text, NONE),
    field(FieldId::PackageSupplier, FieldFormat::Text, NONE),
    field(FieldId::BuildEnvironmentName, FieldFormat::Text, NONE),
    field(FieldId::BuildName, FieldFormat::Text, NONE),
    field(FieldId::BuildId, FieldFormat::Text, NONE),
    field(FieldId::CommitId, FieldFormat::Text, NONE),
    field(FieldId::Branch, FieldFormat::Text, NONE),
    field(FieldId::RepositoryUri, FieldFormat::Uri, URI),
    field(FieldId::ManifestInfo, FieldFormat::List, NONE),
    field(FieldId::Parallelism, FieldFormat::Integer, PARALLELISM),
    field(FieldId::Verbosity, FieldFormat::Enum, NONE),
    field(FieldId::FollowSymlinks, FieldFormat::Flag, NONE),
    field(FieldId::DeleteManifestDirIfPresent, FieldFormat::Flag, NONE),
    field(FieldId::NamespaceUriBase, FieldFormat::Uri, URI),
    field(FieldId::NamespaceUriUniquePart, FieldFormat::Text, NONE),
    field(FieldId::HashAlgorithm, FieldFormat::Enum, NONE),
    field(FieldId::GenerationTimestamp, FieldFormat::Text, NONE),
    field(FieldId::ManifestToolAction, FieldFormat::Enum, REQUIRED),
];
