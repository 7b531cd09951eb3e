#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`GeneratorError`)
//! - [`request`]: Caller inputs (`GenerationRequest`)
//! - [`configuration`]: Per-call configuration (`Configuration`, `Setting`), explicit field
//!   schema (`CONFIGURATION_SCHEMA`), assembler and sanitizer
//! - [`validation`]: Validator sweep (`ConfigValidator` trait, `ValidatorSet`, built-in validators)
//! - [`manifest`]: Generator registry (`ManifestGeneratorProvider`, SPDX 2.2, CycloneDX 1.5)
//! - [`telemetry`]: Per-call recorder and sinks (`TelemetryRecorder`, `TracingTelemetrySink`)
//! - [`workflow`]: Generation workflow extension point (`GenerationWorkflow`)
//! - [`generator`]: Main orchestrator (`SbomGenerator`, `SbomGeneratorBuilder`)
//! - [`logging`]: `tracing-subscriber` initialization
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest --> ConfigurationAssembler --> ValidatorSet --> ConfigSanitizer
//!                                                                        |
//!                                                            FinalizedConfiguration
//!                                                                        |
//!                                         TelemetryRecorder <--> GenerationWorkflow
//!                                                 |
//!                                          TelemetrySink
//!                                                 |
//!                                  FileValidationResult --> EntityError --> GenerationResult
//! ```

pub mod configuration;
pub mod error;
pub mod generator;
pub mod logging;
pub mod manifest;
pub mod request;
pub mod telemetry;
pub mod validation;
pub mod workflow;

// --- Public API Re-exports ---

// Orchestrator
pub use generator::{SbomGenerator, SbomGeneratorBuilder};

// Request
pub use request::GenerationRequest;

// Error
pub use error::GeneratorError;

// Configuration
pub use configuration::{
    CONFIGURATION_SCHEMA, ConfigSanitizer, Configuration, ConfigurationAssembler,
    FinalizedConfiguration, Setting, SettingSource,
};

// Validation
pub use validation::{ConfigValidator, ValidatorSet};

// Registry
pub use manifest::{
    CycloneDx15Generator, ManifestGeneratorProvider, ManifestGeneratorProviderBuilder,
    Spdx22Generator,
};

// Telemetry
pub use telemetry::{NullTelemetrySink, TelemetryRecorder, TracingTelemetrySink};

// Workflow
pub use workflow::GenerationWorkflow;
