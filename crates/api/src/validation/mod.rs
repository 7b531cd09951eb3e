//! 구성 검증 -- 스키마 순서대로 모든 필드에 검증기를 적용
//!
//! [`ValidatorSet`]은 등록 순서를 유지하는 검증기 목록입니다.
//! sweep은 [`CONFIGURATION_SCHEMA`]의 필드를 선언 순서대로 방문하고,
//! 각 필드마다 모든 검증기를 등록 순서대로 호출합니다.
//! 첫 번째 거부에서 sweep을 중단합니다.
//!
//! 동작 태그는 검증기 상태가 아니라 인자로 전달되므로,
//! 같은 검증기 집합을 여러 호출이 동시에 공유할 수 있습니다.

pub mod validators;

use tracing::{debug, warn};

use sbomkit_core::ManifestToolAction;
use sbomkit_core::error::ConfigError;
use sbomkit_core::metrics as m;

use crate::configuration::{
    CONFIGURATION_SCHEMA, Configuration, Constraint, ConstraintKind, FieldDescriptor, FieldValue,
};

pub use validators::{
    DirectoryExistsValidator, DirectoryPathIsWritableValidator, FileExistsValidator,
    IntRangeValidator, UriValidator, ValueRequiredValidator,
};

/// 구성 필드 검증기
///
/// 구현체는 [`constraint_kind`](Self::constraint_kind)가 가리키는 제약을
/// 현재 동작에 대해 가진 필드만 검사합니다. 값이 없는 필드는
/// `ValueRequired`를 제외한 모든 검증기가 건너뜁니다.
pub trait ConfigValidator: Send + Sync {
    /// 검증기 이름 (로그용)
    fn name(&self) -> &str;

    /// 담당하는 제약 조건 종류
    fn constraint_kind(&self) -> ConstraintKind;

    /// 제약이 적용되는 필드 값을 검사합니다. 거부 사유를 `Err`로 반환합니다.
    fn check(&self, constraint: &Constraint, value: &FieldValue<'_>) -> Result<(), String>;

    /// 필드 하나를 검증합니다.
    fn validate(
        &self,
        action: ManifestToolAction,
        field: &FieldDescriptor,
        value: &FieldValue<'_>,
    ) -> Result<(), ConfigError> {
        let kind = self.constraint_kind();
        let Some(constraint) = field.attributes.constraint_for(kind, action) else {
            return Ok(());
        };
        if value.is_unset() && kind != ConstraintKind::ValueRequired {
            return Ok(());
        }

        self.check(constraint, value)
            .map_err(|reason| ConfigError::Validation {
                field: field.name().to_owned(),
                reason,
            })
    }
}

/// 등록 순서를 유지하는 검증기 목록
///
/// 생성 후에는 읽기 전용이며 `Arc`로 공유합니다.
#[derive(Default)]
pub struct ValidatorSet {
    validators: Vec<Box<dyn ConfigValidator>>,
}

impl ValidatorSet {
    /// 빈 검증기 목록을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 검증기 6종을 등록한 목록을 생성합니다.
    pub fn with_defaults() -> Self {
        Self::new()
            .with(ValueRequiredValidator)
            .with(DirectoryExistsValidator)
            .with(DirectoryPathIsWritableValidator)
            .with(FileExistsValidator)
            .with(IntRangeValidator)
            .with(UriValidator)
    }

    /// 검증기를 목록 끝에 추가합니다.
    pub fn with(mut self, validator: impl ConfigValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// 등록된 검증기 수
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// 등록된 검증기가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// 등록 순서대로 검증기 이름을 반환합니다.
    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// 구성 전체를 검증합니다 (첫 거부에서 중단).
    pub fn validate(&self, config: &Configuration) -> Result<(), ConfigError> {
        let action = config.manifest_tool_action;

        for field in CONFIGURATION_SCHEMA {
            let value = field.value(config);
            for validator in &self.validators {
                if let Err(e) = validator.validate(action, field, &value) {
                    warn!(
                        field = field.name(),
                        validator = validator.name(),
                        value = %value,
                        error = %e,
                        "configuration rejected"
                    );
                    metrics::counter!(
                        m::VALIDATION_FAILURES_TOTAL,
                        m::LABEL_FIELD => field.name()
                    )
                    .increment(1);
                    return Err(e);
                }
            }
        }

        debug!(
            action = %action,
            validators = self.validators.len(),
            fields = CONFIGURATION_SCHEMA.len(),
            "configuration validated"
        );
        Ok(())
    }
}
