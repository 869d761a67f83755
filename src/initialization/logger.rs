//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Dependencies that log far more than is useful at the run's level.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("reqwest", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
    ("chromiumoxide", LevelFilter::Warn),
    ("tungstenite", LevelFilter::Warn),
    ("async_tungstenite", LevelFilter::Warn),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first so per-module filters still work; `level` then
/// overrides the global level. Supports a coloured plain format for the
/// terminal and JSON lines for log collectors.
///
/// ```bash
/// RUST_LOG=page_details::fetch=trace page_details urls.txt --log-level info
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (module, cap) in NOISY_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("page_details", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":\"{}\",\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red().bold(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {:>5} {} {}",
                    chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                    colored_level,
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
