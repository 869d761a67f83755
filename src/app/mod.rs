//! Application collaborators around the extraction pipeline.
//!
//! This module provides input reading, URL validation, console prompts,
//! progress output and statistics printing used by the run driver.

pub mod input;
pub mod logging;
pub mod prompt;
pub mod statistics;
pub mod url;

// Re-export public API
pub use input::read_input_file;
pub use logging::{log_progress, log_url_result, log_url_start};
pub use prompt::{confirm_next_batch, prompt_input_path, prompt_url_count, ConsoleTlsPrompt};
pub use statistics::print_run_statistics;
pub use url::validate_url;
