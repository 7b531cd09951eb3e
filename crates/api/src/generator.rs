//! SBOM 생성 오케스트레이터 -- 구성 조립부터 결과 변환까지 한 호출의 흐름 관리
//!
//! # 호출 흐름
//!
//! ```text
//! GenerationRequest
//!        |
//! ConfigurationAssembler::build ----> InvalidArgument
//!        |
//! ValidatorSet::validate -----------> Validation (워크플로 미호출)
//!        |
//! ConfigSanitizer::sanitize
//!        |
//! Configuration::finalize
//!        |
//! GenerationWorkflow::run (1회, await)
//!        |
//! TelemetryRecorder::finalize_and_flush (1회, 워크플로 종료 후)
//!        |
//! FileValidationResult --> EntityError
//!        |
//! GenerationResult
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use sbomkit_core::config::SbomToolConfig;
use sbomkit_core::metrics as m;
use sbomkit_core::{
    AlgorithmName, EntityError, GenerationResult, ManifestToolAction, SbomSpecification,
    TelemetrySink,
};

use crate::configuration::{
    CONFIGURATION_SCHEMA, ConfigSanitizer, ConfigurationAssembler, FieldId,
    FinalizedConfiguration,
};
use crate::error::GeneratorError;
use crate::manifest::ManifestGeneratorProvider;
use crate::request::GenerationRequest;
use crate::telemetry::{NullTelemetrySink, TelemetryRecorder, TracingTelemetrySink};
use crate::validation::ValidatorSet;
use crate::workflow::GenerationWorkflow;

/// 텔레메트리 스위치로 기록하는 구성 필드
const RECORDED_SWITCHES: [FieldId; 6] = [
    FieldId::ManifestInfo,
    FieldId::Parallelism,
    FieldId::Verbosity,
    FieldId::FollowSymlinks,
    FieldId::DeleteManifestDirIfPresent,
    FieldId::HashAlgorithm,
];

/// SBOM 생성 오케스트레이터
///
/// 검증기 집합과 생성기 레지스트리는 생성 후 변경되지 않으며 `Arc`로 공유됩니다.
/// 호출 간에 잠금을 보유하지 않으므로 여러 호출을 동시에 실행할 수 있습니다.
/// 텔레메트리 레코더는 호출마다 새로 만들어집니다.
pub struct SbomGenerator<W> {
    workflow: W,
    validators: Arc<ValidatorSet>,
    provider: Arc<ManifestGeneratorProvider>,
    sanitizer: ConfigSanitizer,
    telemetry_sink: Arc<dyn TelemetrySink>,
}

impl SbomGenerator<()> {
    /// 새 빌더를 생성합니다.
    pub fn builder() -> SbomGeneratorBuilder {
        SbomGeneratorBuilder::new()
    }
}

impl<W> SbomGenerator<W> {
    /// 명세가 요구하는 해시 알고리즘을 선언 순서대로 반환합니다.
    ///
    /// # Errors
    ///
    /// - 명세 이름 또는 버전이 비어 있으면 `InvalidArgument`
    /// - 등록된 생성기가 없으면 `NotFound`
    pub fn required_algorithms(
        &self,
        specification: &SbomSpecification,
    ) -> Result<Vec<AlgorithmName>, GeneratorError> {
        if specification.is_blank() {
            return Err(GeneratorError::InvalidArgument {
                argument: "specification".to_owned(),
                reason: "name and version must not be empty".to_owned(),
            });
        }

        let generator = self.provider.get(&specification.to_manifest_info())?;
        Ok(generator.required_hash_algorithms().to_vec())
    }

    /// 등록된 생성기마다 하나씩, 지원하는 명세 목록을 반환합니다.
    pub fn supported_specifications(&self) -> Vec<SbomSpecification> {
        self.provider
            .supported_manifest_infos()
            .iter()
            .map(SbomSpecification::from)
            .collect()
    }

    /// 공유 중인 생성기 레지스트리
    pub fn provider(&self) -> &Arc<ManifestGeneratorProvider> {
        &self.provider
    }

    /// 공유 중인 검증기 집합
    pub fn validators(&self) -> &Arc<ValidatorSet> {
        &self.validators
    }
}

impl<W: GenerationWorkflow> SbomGenerator<W> {
    /// SBOM을 생성합니다.
    ///
    /// 워크플로는 호출당 최대 한 번 실행되며, 텔레메트리는 워크플로가 끝난 뒤
    /// 성공 여부와 관계없이 한 번 확정됩니다. 워크플로 실패는 에러가 아니라
    /// `GenerationResult::is_successful == false`로 전달됩니다.
    ///
    /// # Errors
    ///
    /// - 필수 입력 누락: `InvalidArgument` (검증기 실행 전)
    /// - 검증기 거부: `Validation` (워크플로 미호출, 텔레메트리 미확정)
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GeneratorError> {
        let recorder = TelemetryRecorder::new(ManifestToolAction::Generate);
        let span = info_span!("sbom_generate", run_id = %recorder.run_id());
        self.run_generation(request, &recorder)
            .instrument(span)
            .await
    }

    async fn run_generation(
        &self,
        request: GenerationRequest,
        recorder: &TelemetryRecorder,
    ) -> Result<GenerationResult, GeneratorError> {
        info!(
            root = %request.root_path.display(),
            component = %request.component_path.display(),
            "sbom generation started"
        );

        let mut config = ConfigurationAssembler::build(request).inspect_err(|e| {
            warn!(error = %e, "sbom generation rejected");
        })?;

        self.validators.validate(&config)?;
        self.sanitizer.sanitize(&mut config);
        let config = config.finalize();
        record_switches(&config, recorder).await;

        let started = Instant::now();
        let is_successful = self.workflow.run(&config, recorder).await;
        let elapsed = started.elapsed();

        recorder.record_outcome(is_successful, elapsed).await;
        recorder
            .finalize_and_flush(self.telemetry_sink.as_ref())
            .await;

        let errors: Vec<EntityError> = recorder
            .errors()
            .await
            .iter()
            .map(EntityError::from)
            .collect();

        let result_label = if is_successful { "success" } else { "failure" };
        metrics::counter!(m::GENERATION_RUNS_TOTAL, m::LABEL_RESULT => result_label)
            .increment(1);
        metrics::histogram!(m::GENERATION_DURATION_SECONDS).record(elapsed.as_secs_f64());
        metrics::counter!(m::GENERATION_ERRORS_TOTAL).increment(errors.len() as u64);

        info!(
            is_successful,
            errors = errors.len(),
            duration_ms = elapsed.as_millis() as u64,
            "sbom generation finished"
        );

        Ok(GenerationResult::new(is_successful, errors))
    }
}

async fn record_switches(config: &FinalizedConfiguration, recorder: &TelemetryRecorder) {
    for field in CONFIGURATION_SCHEMA
        .iter()
        .filter(|f| RECORDED_SWITCHES.contains(&f.id))
    {
        let value = field.value(config);
        if !value.is_unset() {
            recorder.record_switch(field.name(), &value).await;
        }
    }
}

/// SBOM 생성 오케스트레이터 빌더
///
/// 지정하지 않은 협력자는 설정 파일 값에 따라 기본 구현으로 채워집니다.
pub struct SbomGeneratorBuilder {
    config: SbomToolConfig,
    validators: Option<Arc<ValidatorSet>>,
    provider: Option<Arc<ManifestGeneratorProvider>>,
    telemetry_sink: Option<Arc<dyn TelemetrySink>>,
}

impl SbomGeneratorBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: SbomToolConfig::default(),
            validators: None,
            provider: None,
            telemetry_sink: None,
        }
    }

    /// 설정을 지정합니다.
    pub fn config(mut self, config: SbomToolConfig) -> Self {
        self.config = config;
        self
    }

    /// 검증기 집합을 지정합니다 (기본: [`ValidatorSet::with_defaults`]).
    pub fn validators(mut self, validators: ValidatorSet) -> Self {
        self.validators = Some(Arc::new(validators));
        self
    }

    /// 다른 오케스트레이터와 공유할 검증기 집합을 지정합니다.
    pub fn shared_validators(mut self, validators: Arc<ValidatorSet>) -> Self {
        self.validators = Some(validators);
        self
    }

    /// 생성기 레지스트리를 지정합니다 (기본: [`ManifestGeneratorProvider::with_defaults`]).
    pub fn provider(mut self, provider: Arc<ManifestGeneratorProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// 텔레메트리 싱크를 지정합니다.
    ///
    /// 지정하지 않으면 `[telemetry] enabled` 값에 따라
    /// [`TracingTelemetrySink`] 또는 [`NullTelemetrySink`]를 사용합니다.
    pub fn telemetry_sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry_sink = Some(sink);
        self
    }

    /// 오케스트레이터를 빌드합니다.
    pub fn build<W: GenerationWorkflow>(
        self,
        workflow: W,
    ) -> Result<SbomGenerator<W>, GeneratorError> {
        self.config.validate()?;

        let provider = match self.provider {
            Some(provider) => provider,
            None => Arc::new(ManifestGeneratorProvider::with_defaults()?),
        };
        let validators = self
            .validators
            .unwrap_or_else(|| Arc::new(ValidatorSet::with_defaults()));
        let telemetry_sink = self.telemetry_sink.unwrap_or_else(|| {
            if self.config.telemetry.enabled {
                Arc::new(TracingTelemetrySink)
            } else {
                Arc::new(NullTelemetrySink)
            }
        });

        info!(
            validators = validators.len(),
            generators = provider.len(),
            telemetry_sink = telemetry_sink.name(),
            "sbom generator built"
        );

        Ok(SbomGenerator {
            workflow,
            validators,
            provider,
            sanitizer: ConfigSanitizer::new(self.config.generation),
            telemetry_sink,
        })
    }
}

impl Default for SbomGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Succeeds;

    impl GenerationWorkflow for Succeeds {
        async fn run(&self, _: &FinalizedConfiguration, _: &TelemetryRecorder) -> bool {
            true
        }
    }

    fn generator() -> SbomGenerator<Succeeds> {
        SbomGenerator::builder().build(Succeeds).unwrap()
    }

    #[test]
    fn required_algorithms_in_declared_order() {
        let generator = generator();
        assert_eq!(
            generator
                .required_algorithms(&SbomSpecification::new("SPDX", "2.2"))
                .unwrap(),
            vec![AlgorithmName::Sha256, AlgorithmName::Sha1]
        );
        assert_eq!(
            generator
                .required_algorithms(&SbomSpecification::new("cyclonedx", "1.5"))
                .unwrap(),
            vec![AlgorithmName::Sha256, AlgorithmName::Sha512]
        );
    }

    #[test]
    fn required_algorithms_rejects_blank_specification() {
        let err = generator()
            .required_algorithms(&SbomSpecification::new("", ""))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidArgument { .. }));
    }

    #[test]
    fn required_algorithms_unknown_specification_is_not_found() {
        let err = generator()
            .required_algorithms(&SbomSpecification::new("SPDX", "3.0"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::NotFound { ref specification } if specification == "SPDX:3.0"));
    }

    #[test]
    fn supported_specifications_one_per_generator() {
        let specs = generator().supported_specifications();
        assert_eq!(
            specs,
            vec![
                SbomSpecification::new("SPDX", "2.2"),
                SbomSpecification::new("CycloneDX", "1.5"),
            ]
        );
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = SbomToolConfig::default();
        config.generation.parallelism = 0;
        let result = SbomGenerator::builder().config(config).build(Succeeds);
        assert!(matches!(result, Err(GeneratorError::Config { .. })));
    }

    #[test]
    fn build_rejects_namespace_base_the_sanitizer_would_break() {
        for base in ["https://", "https://[bad"] {
            let mut config = SbomToolConfig::default();
            config.generation.namespace_uri_base = base.to_owned();
            let result = SbomGenerator::builder().config(config).build(Succeeds);
            assert!(
                matches!(result, Err(GeneratorError::Config { ref field, .. }) if field == "generation.namespace_uri_base"),
                "{base} should be rejected at build"
            );
        }
    }

    #[test]
    fn build_shares_validators_and_provider() {
        let validators = Arc::new(ValidatorSet::with_defaults());
        let provider = Arc::new(ManifestGeneratorProvider::with_defaults().unwrap());
        let a = SbomGenerator::builder()
            .shared_validators(Arc::clone(&validators))
            .provider(Arc::clone(&provider))
            .build(Succeeds)
            .unwrap();
        let b = SbomGenerator::builder()
            .shared_validators(Arc::clone(&validators))
            .provider(Arc::clone(&provider))
            .build(Succeeds)
            .unwrap();
        assert!(Arc::ptr_eq(a.validators(), b.validators()));
        assert!(Arc::ptr_eq(a.provider(), b.provider()));
    }
}
