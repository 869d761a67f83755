//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONFIG_FILE, DEFAULT_FALLBACK_SCOPE, DEFAULT_INPUT_FILE,
    DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_POST_LOAD_WAIT_SECS, DEFAULT_REQUEST_MAX_RETRIES,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCOPE_PRIORITY, DEFAULT_USER_AGENT,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, READY_STATE_POLL_INTERVAL, RETRY_BACKOFF_FACTOR,
};
use crate::config::file::load_config_file;
use crate::error_handling::ConfigFileError;
use crate::fetch::ProbeSettings;
use crate::render::RenderSettings;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
///
/// The settings file accepts lowercase or uppercase names, plus `WARNING`
/// and `CRITICAL`.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only error messages
    #[serde(alias = "ERROR", alias = "CRITICAL", alias = "critical")]
    Error,
    /// Error and warning messages
    #[serde(alias = "WARN", alias = "WARNING", alias = "warning")]
    Warn,
    /// Error, warning, and informational messages
    #[serde(alias = "INFO")]
    Info,
    /// All messages except trace
    #[serde(alias = "DEBUG")]
    Debug,
    /// All messages including trace
    #[serde(alias = "TRACE")]
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the results file written at the end of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One row per URL, header in the stable record field order
    Csv,
    /// Pretty-printed array of record objects
    Json,
}

impl OutputFormat {
    /// File extension (without the dot) for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through the CLI.
///
/// # Examples
///
/// ```no_run
/// use page_details::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input_file: PathBuf::from("urls.txt"),
///     max_urls: Some(0),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// TXT or CSV file to read URLs from
    pub input_file: PathBuf,

    /// Directory the results file is written to
    pub output_dir: PathBuf,

    /// Results file format
    pub output_format: OutputFormat,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Run the browser without a window
    pub headless: bool,

    /// Browser window width in pixels
    pub window_width: u32,

    /// Browser window height in pixels
    pub window_height: u32,

    /// Explicit Chromium executable (auto-detected when `None`)
    pub chrome_path: Option<PathBuf>,

    /// Maximum HEAD attempts per URL
    pub request_max_retries: u32,

    /// Per-attempt HEAD timeout in seconds
    pub request_timeout_seconds: u64,

    /// Maximum wait for the rendered page to become ready, in seconds
    pub page_load_timeout_seconds: u64,

    /// Fixed wait after the page is ready, in seconds (0 disables it)
    pub fixed_post_load_wait_seconds: u64,

    /// Ordered content scope selectors
    pub scope_priority: Vec<String>,

    /// Scope used when no priority selector matches
    pub fallback_scope: String,

    /// Start the run with certificate verification already disabled
    pub skip_ssl_check_default: bool,

    /// User-Agent pool; one entry is picked at random per run
    pub user_agents: Vec<String>,

    /// Process URLs in batches, asking before each new batch
    pub run_in_batches: bool,

    /// Number of URLs per batch
    pub batch_size: usize,

    /// Number of URLs to process (`Some(0)` = all, `None` = ask interactively)
    pub max_urls: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_format: OutputFormat::Csv,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            headless: true,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            chrome_path: None,
            request_max_retries: DEFAULT_REQUEST_MAX_RETRIES,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_load_timeout_seconds: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            fixed_post_load_wait_seconds: DEFAULT_POST_LOAD_WAIT_SECS,
            scope_priority: DEFAULT_SCOPE_PRIORITY
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            fallback_scope: DEFAULT_FALLBACK_SCOPE.to_string(),
            skip_ssl_check_default: false,
            user_agents: vec![DEFAULT_USER_AGENT.to_string()],
            run_in_batches: false,
            batch_size: DEFAULT_BATCH_SIZE,
            max_urls: None,
        }
    }
}

/// Command-line options.
///
/// Every option left out keeps the value from the settings file, or the
/// default when the file does not set it either.
#[derive(Debug, Parser)]
#[command(
    name = "page_details",
    about = "Extracts titles, meta tags and heading/link/image counts from a list of web pages."
)]
pub struct Opt {
    /// File to read URLs from (.txt: one per line, .csv: first column) [default: input_urls.txt]
    #[arg(value_parser)]
    pub input_file: Option<PathBuf>,

    /// YAML settings file [default: config.yaml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for the results file [default: output/metadata_reports]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Results file format [default: csv]
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Log level [default: info]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Log format [default: plain]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Browser window width [default: 1440]
    #[arg(long)]
    pub window_width: Option<u32>,

    /// Browser window height [default: 1080]
    #[arg(long)]
    pub window_height: Option<u32>,

    /// Path to the Chromium/Chrome executable
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Maximum HEAD attempts per URL [default: 3]
    #[arg(long)]
    pub request_max_retries: Option<u32>,

    /// HEAD request timeout in seconds [default: 10]
    #[arg(long)]
    pub request_timeout: Option<u64>,

    /// Page load timeout in seconds [default: 30]
    #[arg(long)]
    pub page_load_timeout: Option<u64>,

    /// Extra seconds to wait after the page is ready, for deferred rendering [default: 0]
    #[arg(long)]
    pub post_load_wait: Option<u64>,

    /// Content scope selector, in priority order (repeatable)
    #[arg(long = "scope", value_name = "SELECTOR")]
    pub scope_priority: Vec<String>,

    /// Scope analysed when no priority selector matches [default: body]
    #[arg(long)]
    pub fallback_scope: Option<String>,

    /// Skip TLS certificate verification from the start of the run
    #[arg(long)]
    pub skip_ssl_check: bool,

    /// User-Agent to use (repeatable; one is picked at random)
    #[arg(long = "user-agent", value_name = "UA")]
    pub user_agents: Vec<String>,

    /// Process URLs in batches, asking before each new batch
    #[arg(long)]
    pub batches: bool,

    /// URLs per batch [default: 50]
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Number of URLs to process (0 = all); asked interactively when omitted
    #[arg(long)]
    pub max_urls: Option<usize>,
}

impl Opt {
    /// Settings file this run reads.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Replaces every field of `config` that was given on the command line.
    ///
    /// Switches (`--headed`, `--skip-ssl-check`, `--batches`) only ever turn
    /// their setting on; leaving them out keeps the current value.
    pub fn apply_to(self, config: &mut Config) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut config.input_file, self.input_file);
        set(&mut config.output_dir, self.output_dir);
        set(&mut config.output_format, self.output_format);
        set(&mut config.log_level, self.log_level);
        set(&mut config.log_format, self.log_format);
        if self.headed {
            config.headless = false;
        }
        set(&mut config.window_width, self.window_width);
        set(&mut config.window_height, self.window_height);
        if self.chrome_path.is_some() {
            config.chrome_path = self.chrome_path;
        }
        set(&mut config.request_max_retries, self.request_max_retries);
        set(&mut config.request_timeout_seconds, self.request_timeout);
        set(&mut config.page_load_timeout_seconds, self.page_load_timeout);
        set(&mut config.fixed_post_load_wait_seconds, self.post_load_wait);
        if !self.scope_priority.is_empty() {
            config.scope_priority = self.scope_priority;
        }
        set(&mut config.fallback_scope, self.fallback_scope);
        if self.skip_ssl_check {
            config.skip_ssl_check_default = true;
        }
        if !self.user_agents.is_empty() {
            config.user_agents = self.user_agents;
        }
        if self.batches {
            config.run_in_batches = true;
        }
        set(&mut config.batch_size, self.batch_size);
        if self.max_urls.is_some() {
            config.max_urls = self.max_urls;
        }
    }
}

impl Config {
    /// Resolves the run configuration: defaults, then the settings file, then
    /// the command line.
    ///
    /// A settings file that is missing or cannot be parsed leaves the
    /// defaults in place. The problem is returned next to the configuration
    /// so it can be logged once the logger is up.
    pub fn from_cli(opt: Opt) -> (Self, Option<ConfigFileError>) {
        let mut config = Config::default();
        let file_error = match load_config_file(&opt.config_path()) {
            Ok(settings) => {
                settings.apply_to(&mut config);
                None
            }
            Err(e) => Some(e),
        };
        opt.apply_to(&mut config);
        (config, file_error)
    }
}

/// Settings read by the extraction pipeline for every URL.
///
/// Derived once per run from [`Config`]; the pipeline never validates them.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    /// Preflight retry/timeout settings
    pub probe: ProbeSettings,
    /// Rendered page wait settings
    pub render: RenderSettings,
    /// Scope analysed when no priority selector matches
    pub fallback_scope: String,
}

impl From<&Config> for ExtractionSettings {
    fn from(config: &Config) -> Self {
        let post_load_wait = (config.fixed_post_load_wait_seconds > 0)
            .then(|| Duration::from_secs(config.fixed_post_load_wait_seconds));
        Self {
            probe: ProbeSettings {
                max_retries: config.request_max_retries,
                timeout: Duration::from_secs(config.request_timeout_seconds),
                backoff_factor: RETRY_BACKOFF_FACTOR,
            },
            render: RenderSettings {
                load_timeout: Duration::from_secs(config.page_load_timeout_seconds),
                post_load_wait,
                poll_interval: READY_STATE_POLL_INTERVAL,
            },
            fallback_scope: config.fallback_scope.clone(),
        }
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_max_retries, 3);
        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.page_load_timeout_seconds, 30);
        assert_eq!(config.fixed_post_load_wait_seconds, 0);
        assert_eq!(
            config.scope_priority,
            vec!["main", "div[role='main']", "article"]
        );
        assert_eq!(config.fallback_scope, "body");
        assert!(!config.skip_ssl_check_default);
        assert!(!config.run_in_batches);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert!(config.max_urls.is_none());
    }

    #[test]
    fn test_opt_without_flags_keeps_config() {
        let opt = Opt::parse_from(["page_details"]);
        assert_eq!(opt.config_path(), PathBuf::from("config.yaml"));

        let mut config = Config {
            request_max_retries: 7,
            headless: false,
            run_in_batches: true,
            ..Default::default()
        };
        opt.apply_to(&mut config);
        assert_eq!(config.request_max_retries, 7);
        assert!(!config.headless);
        assert!(config.run_in_batches);
        assert_eq!(config.input_file, Config::default().input_file);
    }

    #[test]
    fn test_opt_overrides() {
        let opt = Opt::parse_from([
            "page_details",
            "urls.csv",
            "--scope",
            "#content",
            "--scope",
            "article",
            "--output-format",
            "json",
            "--headed",
            "--skip-ssl-check",
            "--max-urls",
            "5",
            "--request-timeout",
            "4",
        ]);
        let mut config = Config::default();
        opt.apply_to(&mut config);
        assert_eq!(config.input_file, PathBuf::from("urls.csv"));
        assert_eq!(config.scope_priority, vec!["#content", "article"]);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(!config.headless);
        assert!(config.skip_ssl_check_default);
        assert_eq!(config.max_urls, Some(5));
        assert_eq!(config.request_timeout_seconds, 4);
    }

    #[test]
    fn test_from_cli_layers_file_under_flags() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("settings.yaml");
        std::fs::write(
            &path,
            "settings:\n  request_max_retries: 5\n  batch_size: 20\n  log_level: WARNING\n",
        )
        .unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let opt = Opt::parse_from(["page_details", "--config", &path_arg, "--batch-size", "8"]);
        let (config, file_error) = Config::from_cli(opt);

        assert!(file_error.is_none());
        assert_eq!(config.request_max_retries, 5);
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.request_timeout_seconds, 10);
    }

    #[test]
    fn test_from_cli_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path_arg = dir.path().join("absent.yaml").to_string_lossy().to_string();

        let opt = Opt::parse_from(["page_details", "--config", &path_arg, "--max-urls", "2"]);
        let (config, file_error) = Config::from_cli(opt);

        assert!(matches!(file_error, Some(ConfigFileError::NotFound { .. })));
        assert_eq!(config.request_max_retries, 3);
        assert_eq!(config.max_urls, Some(2));
    }

    #[test]
    fn test_from_cli_unparsable_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "settings:\n  request_max_retries: 9\n  headless: [yes\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let opt = Opt::parse_from(["page_details", "--config", &path_arg]);
        let (config, file_error) = Config::from_cli(opt);

        assert!(matches!(file_error, Some(ConfigFileError::Parse { .. })));
        assert_eq!(config.request_max_retries, 3);
        assert!(config.headless);
    }

    #[test]
    fn test_extraction_settings_post_load_wait() {
        let mut config = Config::default();
        assert!(ExtractionSettings::from(&config)
            .render
            .post_load_wait
            .is_none());

        config.fixed_post_load_wait_seconds = 3;
        let settings = ExtractionSettings::from(&config);
        assert_eq!(settings.render.post_load_wait, Some(Duration::from_secs(3)));
        assert_eq!(settings.probe.max_retries, 3);
        assert_eq!(settings.probe.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
