//! Configuration constants.
//!
//! This module defines all constants used throughout the application,
//! including retry parameters, timeouts, default settings, and the error tags
//! written into the `error` column of every result record.

use std::time::Duration;

// Input / output defaults
pub const DEFAULT_INPUT_FILE: &str = "input_urls.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "output/metadata_reports";
/// Parts of `DEFAULT_OUTPUT_DIR`, settable separately in the settings file
pub const DEFAULT_OUTPUT_BASE_DIR: &str = "output";
pub const DEFAULT_OUTPUT_SUBFOLDER: &str = "metadata_reports";
/// Settings file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Prefix of every output file name: `page_details_<domain>_<timestamp>.<ext>`
pub const OUTPUT_FILE_PREFIX: &str = "page_details";
/// Timestamp format used in output file names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DEFAULT_BATCH_SIZE: usize = 50;

// Browser window
pub const DEFAULT_WINDOW_WIDTH: u32 = 1440;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1080;

// Preflight request
/// Maximum number of HEAD attempts per URL (including the first one)
pub const DEFAULT_REQUEST_MAX_RETRIES: u32 = 3;
/// Per-attempt HEAD request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Maximum number of redirect hops followed by the preflight request
pub const MAX_REDIRECT_HOPS: usize = 10;

// Retry strategy
/// Backoff grows as `RETRY_BACKOFF_BASE^n * factor`.
/// With a factor of 500ms the delays are 1s, 2s, 4s, ... (`2^attempt` seconds).
pub const RETRY_BACKOFF_BASE: u64 = 2;
/// Multiplier applied to every backoff step
pub const RETRY_BACKOFF_FACTOR: Duration = Duration::from_millis(500);

// Page rendering
/// Maximum time to wait for `document.readyState == "complete"`
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;
/// Extra fixed wait after readiness (0 disables it)
pub const DEFAULT_POST_LOAD_WAIT_SECS: u64 = 0;
/// How often the document ready state is polled while waiting for load
pub const READY_STATE_POLL_INTERVAL: Duration = Duration::from_millis(250);

// Content scope
/// Selectors tried in order when resolving the main content region
pub const DEFAULT_SCOPE_PRIORITY: &[&str] = &["main", "div[role='main']", "article"];
/// Selector that is only accepted when exactly one element matches it
pub const UNIQUE_SCOPE_SELECTOR: &str = "article";
/// Whole-document scope used when no priority selector matched
pub const DEFAULT_FALLBACK_SCOPE: &str = "body";

/// Default User-Agent string for the preflight request and the browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Error tags (values of `PageRecord::error`)
pub const TAG_RENDER_FAILED: &str = "Failed to fetch/parse rendered page";
/// Separator used when several tags accumulate on one record
pub const ERROR_TAG_SEPARATOR: &str = "; ";

/// Content type recorded when the response has no `Content-Type` header
pub const UNKNOWN_CONTENT_TYPE: &str = "Unknown";
