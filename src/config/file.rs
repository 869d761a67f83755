//! Settings file loading.
//!
//! Settings can be kept in a YAML file (default `config.yaml`) under a
//! top-level `settings:` map:
//!
//! ```yaml
//! settings:
//!   input_file: urls.csv
//!   log_level: DEBUG
//!   request_max_retries: 5
//!   scope_priority:
//!     - "#content"
//!     - main
//! ```
//!
//! Every key is optional. Values from the file replace the defaults, and
//! command-line flags replace values from the file. A missing or unreadable
//! file is not fatal: the caller logs the [`ConfigFileError`] and the run
//! continues with the defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::constants::{DEFAULT_OUTPUT_BASE_DIR, DEFAULT_OUTPUT_SUBFOLDER};
use crate::config::types::{Config, LogFormat, LogLevel, OutputFormat};
use crate::error_handling::ConfigFileError;

#[derive(Debug, Default, Deserialize)]
struct SettingsDocument {
    settings: Option<FileSettings>,
}

/// Values read from the `settings:` map of a settings file.
///
/// Unknown keys are ignored. The older key names `request_timeout`,
/// `page_load_timeout` and `skip_ssl_check_on_error` are accepted as aliases,
/// and `output_base_dir` / `output_subfolder` may be given instead of
/// `output_dir`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub input_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output_base_dir: Option<PathBuf>,
    pub output_subfolder: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub headless: Option<bool>,
    pub window_width: Option<u32>,
    pub window_height: Option<u32>,
    pub chrome_path: Option<PathBuf>,
    pub request_max_retries: Option<u32>,
    #[serde(alias = "request_timeout")]
    pub request_timeout_seconds: Option<u64>,
    #[serde(alias = "page_load_timeout")]
    pub page_load_timeout_seconds: Option<u64>,
    pub fixed_post_load_wait_seconds: Option<u64>,
    pub scope_priority: Option<Vec<String>>,
    pub fallback_scope: Option<String>,
    #[serde(alias = "skip_ssl_check_on_error")]
    pub skip_ssl_check_default: Option<bool>,
    pub user_agents: Option<Vec<String>>,
    pub run_in_batches: Option<bool>,
    pub batch_size: Option<usize>,
    pub max_urls: Option<usize>,
}

impl FileSettings {
    /// Parses the contents of a settings file. An empty document or one
    /// without a `settings:` map yields no overrides.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: SettingsDocument = serde_yaml::from_str(content)?;
        Ok(document.settings.unwrap_or_default())
    }

    /// Replaces every field of `config` that this file sets.
    pub fn apply_to(self, config: &mut Config) {
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        } else if self.output_base_dir.is_some() || self.output_subfolder.is_some() {
            let base = self
                .output_base_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_BASE_DIR));
            let subfolder = self
                .output_subfolder
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_SUBFOLDER));
            config.output_dir = base.join(subfolder);
        }

        set(&mut config.input_file, self.input_file);
        set(&mut config.output_format, self.output_format);
        set(&mut config.log_level, self.log_level);
        set(&mut config.log_format, self.log_format);
        set(&mut config.headless, self.headless);
        set(&mut config.window_width, self.window_width);
        set(&mut config.window_height, self.window_height);
        if self.chrome_path.is_some() {
            config.chrome_path = self.chrome_path;
        }
        set(&mut config.request_max_retries, self.request_max_retries);
        set(&mut config.request_timeout_seconds, self.request_timeout_seconds);
        set(&mut config.page_load_timeout_seconds, self.page_load_timeout_seconds);
        set(
            &mut config.fixed_post_load_wait_seconds,
            self.fixed_post_load_wait_seconds,
        );
        set(
            &mut config.scope_priority,
            self.scope_priority.filter(|list| !list.is_empty()),
        );
        set(&mut config.fallback_scope, self.fallback_scope);
        set(&mut config.skip_ssl_check_default, self.skip_ssl_check_default);
        set(
            &mut config.user_agents,
            self.user_agents.filter(|list| !list.is_empty()),
        );
        set(&mut config.run_in_batches, self.run_in_batches);
        set(&mut config.batch_size, self.batch_size);
        if self.max_urls.is_some() {
            config.max_urls = self.max_urls;
        }
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Reads and parses the settings file at `path`.
pub fn load_config_file(path: &Path) -> Result<FileSettings, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigFileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigFileError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    FileSettings::from_yaml(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
