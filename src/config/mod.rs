//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry backoff, error tags, etc.)
//! - CLI option types and parsing
//! - The optional YAML settings file layered under the CLI options
//! - The per-URL extraction settings handed to the pipeline

mod constants;
mod file;
mod types;

// Re-export all constants
pub use constants::*;
pub use file::{load_config_file, FileSettings};
pub use types::{Config, ExtractionSettings, LogFormat, LogLevel, Opt, OutputFormat};
