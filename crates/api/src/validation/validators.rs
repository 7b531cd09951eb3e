//! 기본 구성 검증기
//!
//! 각 검증기는 하나의 [`ConstraintKind`]를 담당합니다.

use std::path::Path;

use super::ConfigValidator;
use crate::configuration::{Constraint, ConstraintKind, FieldValue};

/// 값이 존재하고 비어 있지 않아야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueRequiredValidator;

impl ConfigValidator for ValueRequiredValidator {
    fn name(&self) -> &str {
        "value_required"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::ValueRequired
    }

    fn check(&self, _: &Constraint, value: &FieldValue<'_>) -> Result<(), String> {
        if value.is_blank() {
            return Err("a value is required".to_owned());
        }
        Ok(())
    }
}

/// 경로가 존재하는 디렉토리여야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryExistsValidator;

impl ConfigValidator for DirectoryExistsValidator {
    fn name(&self) -> &str {
        "directory_exists"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::DirectoryExists
    }

    fn check(&self, _: &Constraint, value: &FieldValue<'_>) -> Result<(), String> {
        let Some(path) = as_path(value) else {
            return Ok(());
        };
        if !path.is_dir() {
            return Err(format!("directory '{}' does not exist", path.display()));
        }
        Ok(())
    }
}

/// 경로가 존재하고 쓰기 가능한 디렉토리여야 합니다.
///
/// 디렉토리 안에 임시 파일을 만들었다가 바로 지워서 확인합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryPathIsWritableValidator;

impl ConfigValidator for DirectoryPathIsWritableValidator {
    fn name(&self) -> &str {
        "directory_path_is_writable"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::DirectoryWritable
    }

    fn check(&self, _: &Constraint, value: &FieldValue<'_>) -> Result<(), String> {
        let Some(path) = as_path(value) else {
            return Ok(());
        };
        let metadata = std::fs::metadata(path)
            .map_err(|e| format!("directory '{}' is not accessible: {e}", path.display()))?;
        if !metadata.is_dir() {
            return Err(format!("'{}' is not a directory", path.display()));
        }
        // 권한 비트가 아닌 현재 프로세스의 실제 쓰기 가능 여부를 확인
        tempfile::Builder::new()
            .prefix(".sbomkit-write-check")
            .tempfile_in(path)
            .map_err(|e| format!("directory '{}' is not writable: {e}", path.display()))?;
        Ok(())
    }
}

/// 경로가 존재하는 일반 파일이어야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExistsValidator;

impl ConfigValidator for FileExistsValidator {
    fn name(&self) -> &str {
        "file_exists"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::FileExists
    }

    fn check(&self, _: &Constraint, value: &FieldValue<'_>) -> Result<(), String> {
        let Some(path) = as_path(value) else {
            return Ok(());
        };
        if !path.is_file() {
            return Err(format!("file '{}' does not exist", path.display()));
        }
        Ok(())
    }
}

/// 정수가 선언된 포함 범위 안에 있어야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntRangeValidator;

impl ConfigValidator for IntRangeValidator {
    fn name(&self) -> &str {
        "int_range"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::IntRange
    }

    fn check(&self, constraint: &Constraint, value: &FieldValue<'_>) -> Result<(), String> {
        let (Constraint::IntRange { min, max }, FieldValue::Integer(n)) = (constraint, value)
        else {
            return Ok(());
        };
        if !(*min..=*max).contains(n) {
            return Err(format!("{n} is outside the range {min}..={max}"));
        }
        Ok(())
    }
}

/// 값이 절대 URI여야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriValidator;

impl ConfigValidator for UriValidator {
    fn name(&self) -> &str {
        "uri"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::Uri
    }

    fn check(&self, _: &Constraint, value: &FieldValue<'_>) -> Result<(), String> {
        let FieldValue::Text(text) = value else {
            return Ok(());
        };
        let trimmed = text.trim();
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| format!("'{trimmed}' is not a valid absolute URI: {e}"))?;
        if parsed.cannot_be_a_base() {
            return Err(format!("'{trimmed}' is not a hierarchical URI"));
        }
        Ok(())
    }
}

fn as_path<'a>(value: &FieldValue<'a>) -> Option<&'a Path> {
    match value {
        FieldValue::Path(p) => Some(*p),
        _ => None,
    }
}
