//! End-to-end orchestrator tests for sbomkit-api

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sbomkit_api::configuration::{Constraint, ConstraintKind, FieldDescriptor, FieldId, FieldValue};
use sbomkit_api::{
    ConfigValidator, FinalizedConfiguration, GenerationRequest, GenerationWorkflow,
    GeneratorError, ManifestGeneratorProvider, SbomGenerator, SettingSource, Spdx22Generator,
    TelemetryRecorder, ValidatorSet,
};
use sbomkit_core::error::{ConfigError, TelemetryError};
use sbomkit_core::{
    AlgorithmName, BoxFuture, Entity, EntityErrorType, ErrorType, FileValidationResult,
    ManifestInfo, ManifestToolAction, RuntimeConfiguration, SbomMetadata, SbomSpecification,
    TelemetryRecord, TelemetrySink,
};
use tempfile::TempDir;

type EventLog = Arc<Mutex<Vec<&'static str>>>;

/// Workflow double: counts calls, records scripted errors, keeps the last configuration.
struct ScriptedWorkflow {
    result: bool,
    records: Vec<FileValidationResult>,
    calls: AtomicUsize,
    seen: Mutex<Option<FinalizedConfiguration>>,
    events: EventLog,
}

impl ScriptedWorkflow {
    fn new(result: bool, records: Vec<FileValidationResult>, events: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            result,
            records,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(None),
            events: Arc::clone(events),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn seen(&self) -> FinalizedConfiguration {
        self.seen
            .lock()
            .unwrap()
            .clone()
            .expect("workflow was invoked")
    }
}

impl GenerationWorkflow for ScriptedWorkflow {
    async fn run(&self, config: &FinalizedConfiguration, recorder: &TelemetryRecorder) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("workflow_started");
        *self.seen.lock().unwrap() = Some(config.clone());

        for record in &self.records {
            tokio::task::yield_now().await;
            recorder.record_error(record.clone()).await;
        }

        self.events.lock().unwrap().push("workflow_finished");
        self.result
    }
}

/// Sink double: counts flushes and logs when they happen.
struct RecordingSink {
    records: Mutex<Vec<TelemetryRecord>>,
    events: EventLog,
}

impl RecordingSink {
    fn new(events: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
            events: Arc::clone(events),
        })
    }

    fn flushes(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl TelemetrySink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn flush<'a>(
        &'a self,
        record: &'a TelemetryRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>> {
        Box::pin(async move {
            self.events.lock().unwrap().push("telemetry_flushed");
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        })
    }
}

/// Validator double: rejects one field and counts every invocation.
struct RejectField {
    field: Option<FieldId>,
    invocations: Arc<AtomicUsize>,
}

impl ConfigValidator for RejectField {
    fn name(&self) -> &str {
        "reject_field"
    }

    fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::ValueRequired
    }

    fn check(&self, _: &Constraint, _: &FieldValue<'_>) -> Result<(), String> {
        Ok(())
    }

    fn validate(
        &self,
        _action: ManifestToolAction,
        field: &FieldDescriptor,
        _value: &FieldValue<'_>,
    ) -> Result<(), ConfigError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if self.field == Some(field.id) {
            return Err(ConfigError::Validation {
                field: field.name().to_owned(),
                reason: "rejected by test".to_owned(),
            });
        }
        Ok(())
    }
}

/// Build drop directory with a component subdirectory.
fn drop_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("component")).unwrap();
    dir
}

fn metadata() -> SbomMetadata {
    SbomMetadata {
        package_name: Some("demo".to_owned()),
        package_version: Some("1.0.0".to_owned()),
        package_supplier: Some("sbomkit".to_owned()),
        ..SbomMetadata::default()
    }
}

fn request_for(root: &Path) -> GenerationRequest {
    GenerationRequest::new(root, root.join("component")).metadata(metadata())
}

fn generator_with(
    workflow: &Arc<ScriptedWorkflow>,
    sink: &Arc<RecordingSink>,
    validators: ValidatorSet,
) -> SbomGenerator<Arc<ScriptedWorkflow>> {
    SbomGenerator::builder()
        .validators(validators)
        .telemetry_sink(Arc::clone(sink) as Arc<dyn TelemetrySink>)
        .build(Arc::clone(workflow))
        .unwrap()
}

/// Empty root path is rejected before any validator runs
#[tokio::test]
async fn test_empty_root_path_is_invalid_argument() {
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let invocations = Arc::new(AtomicUsize::new(0));
    let validators = ValidatorSet::new().with(RejectField {
        field: None,
        invocations: Arc::clone(&invocations),
    });
    let generator = generator_with(&workflow, &sink, validators);

    let request = GenerationRequest::new("", "component").metadata(metadata());
    let err = generator.generate(request).await.unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::InvalidArgument { ref argument, .. } if argument == "root_path"
    ));
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert_eq!(workflow.calls(), 0);
    assert_eq!(sink.flushes(), 0);
}

/// Missing metadata is rejected before any validator runs
#[tokio::test]
async fn test_missing_metadata_is_invalid_argument() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let request = GenerationRequest::new(root.path(), root.path().join("component"));
    let err = generator.generate(request).await.unwrap_err();

    assert!(matches!(err, GeneratorError::InvalidArgument { .. }));
    assert_eq!(workflow.calls(), 0);
}

/// A validator rejecting the manifest directory stops the call before the workflow
#[tokio::test]
async fn test_validator_rejection_skips_workflow_and_telemetry() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let invocations = Arc::new(AtomicUsize::new(0));
    let validators = ValidatorSet::with_defaults().with(RejectField {
        field: Some(FieldId::ManifestDirPath),
        invocations: Arc::clone(&invocations),
    });
    let generator = generator_with(&workflow, &sink, validators);

    let err = generator
        .generate(request_for(root.path()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::Validation { ref field, .. } if field == "manifest_dir_path"
    ));
    // build_drop_path, build_component_path, manifest_dir_path
    assert_eq!(invocations.load(Ordering::SeqCst), 3);
    assert_eq!(workflow.calls(), 0);
    assert_eq!(sink.flushes(), 0);
    assert!(events.lock().unwrap().is_empty());
}

/// Non-existent root directory fails the built-in directory check
#[tokio::test]
async fn test_missing_root_directory_is_validation_error() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("missing");
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let err = generator
        .generate(GenerationRequest::new(&missing, missing.join("component")).metadata(metadata()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::Validation { ref field, .. } if field == "build_drop_path"
    ));
    assert_eq!(workflow.calls(), 0);
}

/// Workflow failure with two records is returned as data, in order
#[tokio::test]
async fn test_failed_workflow_errors_are_translated_in_order() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(
        false,
        vec![
            FileValidationResult::new(ErrorType::MissingFile, "/src/a.txt"),
            FileValidationResult::new(ErrorType::PackageError, "pkg:cargo/serde@1.0.0"),
        ],
        &events,
    );
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let result = generator.generate(request_for(root.path())).await.unwrap();

    assert!(!result.is_successful);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].error_type, EntityErrorType::FileError);
    assert_eq!(
        result.errors[0].entity,
        Entity::File {
            path: "/src/a.txt".to_owned()
        }
    );
    assert_eq!(result.errors[1].error_type, EntityErrorType::PackageError);
    assert!(matches!(
        result.errors[1].entity,
        Entity::Package { ref id, .. } if id == "pkg:cargo/serde@1.0.0"
    ));
    assert_eq!(workflow.calls(), 1);
}

/// Successful workflow without records yields an empty error list
#[tokio::test]
async fn test_successful_workflow_without_errors() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let result = generator.generate(request_for(root.path())).await.unwrap();

    assert!(result.is_successful);
    assert!(result.errors.is_empty());
    assert_eq!(workflow.calls(), 1);
}

/// Success flag and recorded errors are independent signals
#[tokio::test]
async fn test_successful_workflow_may_still_report_errors() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(
        true,
        vec![FileValidationResult::new(ErrorType::Other, "x")],
        &events,
    );
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let result = generator.generate(request_for(root.path())).await.unwrap();

    assert!(result.is_successful);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].error_type, EntityErrorType::Other);
}

/// Telemetry is finalized exactly once, after the workflow resolves
#[tokio::test]
async fn test_telemetry_finalized_once_after_workflow() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(
        false,
        vec![FileValidationResult::new(ErrorType::InvalidHash, "/a")],
        &events,
    );
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    generator.generate(request_for(root.path())).await.unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec!["workflow_started", "workflow_finished", "telemetry_flushed"]
    );
    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_successful);
    assert_eq!(records[0].error_count, 1);
    assert_eq!(records[0].action, ManifestToolAction::Generate);
    assert!(
        records[0]
            .switches
            .iter()
            .any(|(name, value)| name == "parallelism" && value == "8")
    );
}

/// Workflow receives a sanitized configuration with defaults filled in
#[tokio::test]
async fn test_workflow_sees_sanitized_configuration() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let request = request_for(root.path()).specifications(vec![
        SbomSpecification::new("SPDX", "2.2"),
        SbomSpecification::new("spdx", "2.2"),
    ]);
    generator.generate(request).await.unwrap();

    let config = workflow.seen();
    assert_eq!(config.manifest_tool_action, ManifestToolAction::Generate);
    assert_eq!(
        config.manifest_dir_path(),
        Some(root.path().join("_manifest").as_path())
    );
    assert_eq!(
        config.manifest_dir_path.as_ref().map(|s| s.source),
        Some(SettingSource::Default)
    );
    assert_eq!(config.manifest_infos(), &[ManifestInfo::new("SPDX", "2.2")]);
    assert_eq!(
        config.hash_algorithm.as_ref().map(|s| s.value),
        Some(AlgorithmName::Sha256)
    );
    assert!(config.namespace_uri_unique_part.is_some());
    assert!(config.generation_timestamp.is_some());
    assert_eq!(
        config.package_name.as_ref().map(|s| s.value.as_str()),
        Some("demo")
    );
}

/// Caller-supplied runtime options survive sanitization
#[tokio::test]
async fn test_runtime_configuration_is_honoured() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let runtime = RuntimeConfiguration {
        workflow_parallelism: 16,
        follow_symlinks: false,
        namespace_uri_base: Some("https://example.com/sbom/".to_owned()),
        ..RuntimeConfiguration::default()
    };
    generator
        .generate(request_for(root.path()).runtime_configuration(runtime))
        .await
        .unwrap();

    let config = workflow.seen();
    assert_eq!(config.parallelism.as_ref().map(|s| s.value), Some(16));
    assert_eq!(
        config.parallelism.as_ref().map(|s| s.source),
        Some(SettingSource::Api)
    );
    assert_eq!(config.follow_symlinks.as_ref().map(|s| s.value), Some(false));
    assert_eq!(
        config.namespace_uri_base.as_ref().map(|s| s.value.as_str()),
        Some("https://example.com/sbom")
    );
}

/// Invalid repository URI in metadata is rejected by the URI validator
#[tokio::test]
async fn test_invalid_repository_uri_is_rejected() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let request = GenerationRequest::new(root.path(), root.path().join("component")).metadata(
        SbomMetadata {
            repository_uri: Some("not a uri".to_owned()),
            ..metadata()
        },
    );
    let err = generator.generate(request).await.unwrap_err();

    assert!(matches!(
        err,
        GeneratorError::Validation { ref field, .. } if field == "repository_uri"
    ));
    assert_eq!(workflow.calls(), 0);
}

/// Each call gets a fresh recorder, so errors never leak between calls
#[tokio::test]
async fn test_recorder_state_is_call_scoped() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(
        false,
        vec![FileValidationResult::new(ErrorType::MissingFile, "/a")],
        &events,
    );
    let sink = RecordingSink::new(&events);
    let generator = generator_with(&workflow, &sink, ValidatorSet::with_defaults());

    let first = generator.generate(request_for(root.path())).await.unwrap();
    let second = generator.generate(request_for(root.path())).await.unwrap();

    assert_eq!(first.errors.len(), 1);
    assert_eq!(second.errors.len(), 1);
    assert_eq!(workflow.calls(), 2);

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].run_id, records[1].run_id);
}

/// Concurrent calls share validators and registry without interfering
#[tokio::test]
async fn test_concurrent_calls() {
    let root = drop_dir();
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(
        true,
        vec![
            FileValidationResult::new(ErrorType::MissingFile, "/a"),
            FileValidationResult::new(ErrorType::AdditionalFile, "/b"),
        ],
        &events,
    );
    let sink = RecordingSink::new(&events);
    let generator = Arc::new(generator_with(
        &workflow,
        &sink,
        ValidatorSet::with_defaults(),
    ));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let generator = Arc::clone(&generator);
        let request = request_for(root.path());
        handles.push(tokio::spawn(
            async move { generator.generate(request).await },
        ));
    }

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].entity, Entity::File { path: "/a".to_owned() });
    }
    assert_eq!(workflow.calls(), 4);
    assert_eq!(sink.flushes(), 4);
}

/// Registry queries go through the configured provider
#[tokio::test]
async fn test_registry_queries_with_custom_provider() {
    let events = EventLog::default();
    let workflow = ScriptedWorkflow::new(true, Vec::new(), &events);
    let provider = ManifestGeneratorProvider::builder()
        .register(Arc::new(Spdx22Generator))
        .build()
        .unwrap();
    let generator = SbomGenerator::builder()
        .provider(Arc::new(provider))
        .build(Arc::clone(&workflow))
        .unwrap();

    assert_eq!(
        generator.supported_specifications(),
        vec![SbomSpecification::new("SPDX", "2.2")]
    );
    assert_eq!(
        generator
            .required_algorithms(&SbomSpecification::new("SPDX", "2.2"))
            .unwrap(),
        vec![AlgorithmName::Sha256, AlgorithmName::Sha1]
    );
    assert!(matches!(
        generator.required_algorithms(&SbomSpecification::new("CycloneDX", "1.5")),
        Err(GeneratorError::NotFound { .. })
    ));
    assert!(matches!(
        generator.required_algorithms(&SbomSpecification::new(" ", "1.5")),
        Err(GeneratorError::InvalidArgument { .. })
    ));
}
