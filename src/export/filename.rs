//! Output file naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::config::{OutputFormat, OUTPUT_FILE_PREFIX, OUTPUT_TIMESTAMP_FORMAT};

/// Turns the network location of `url` into a file-name-safe string.
///
/// `.`, `:`, `/` and `\` become `_`; other characters that are not
/// alphanumeric, `_` or `-` are dropped; leading and trailing `_` are
/// trimmed. Falls back to `unknown_domain`.
pub fn sanitize_domain(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return "unknown_domain".to_string();
    };
    let Some(host) = parsed.host_str() else {
        return "unknown_domain".to_string();
    };
    let netloc = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let sanitized: String = netloc
        .chars()
        .map(|c| if matches!(c, '.' | ':' | '/' | '\\') { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-'))
        .collect();
    let sanitized = sanitized.trim_matches('_');

    if sanitized.is_empty() {
        "unknown_domain".to_string()
    } else {
        sanitized.to_string()
    }
}

/// Builds `<dir>/page_details_<domain>_<timestamp>.<ext>`.
pub fn output_path<Tz: TimeZone>(
    dir: &Path,
    first_url: &str,
    format: OutputFormat,
    started_at: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!(
        "{}_{}_{}.{}",
        OUTPUT_FILE_PREFIX,
        sanitize_domain(first_url),
        started_at.format(OUTPUT_TIMESTAMP_FORMAT),
        format.extension()
    ))
}
