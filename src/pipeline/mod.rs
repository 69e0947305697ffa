//! Configured, observable graph-and-rank runs.
//!
//! The pipeline layer wraps the core graph and rank modules with a
//! declarative [`RunSpec`], a [`ValidationEngine`] that checks a spec
//! before execution, a [`Pipeline`] runner that executes the stages,
//! and a [`PipelineObserver`] hook surface for timing and telemetry.

pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod validation;

pub use errors::{ErrorCode, SpecError};
pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use runner::{Pipeline, RankedGraph};
pub use spec::{GraphSpec, RankSpec, RunSpec, RuntimeSpec, TeleportMode};
pub use validation::{Severity, ValidationDiagnostic, ValidationEngine, ValidationReport, ValidationRule};
