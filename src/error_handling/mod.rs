//! Error handling and run statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, settings file, preflight, pipeline faults)
//! - Classification of `reqwest` failures into preflight failure kinds
//! - Per-outcome run statistics
//!
//! Nothing in the extraction pipeline propagates these errors to the caller:
//! every failure ends up as a tag in the `error` field of a result record.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{backoff_delays, classify_reqwest_error};
pub use stats::RunStats;
pub use types::{
    ConfigFileError, InitializationError, PageOutcome, PipelineError, ProbeError, RequestFailure,
};
