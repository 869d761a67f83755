//! Result export.
//!
//! Writes the run's records to a CSV or JSON file named after the first
//! URL's domain and the run's start time.

mod csv;
mod filename;
mod json;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

pub use self::csv::export_csv;
pub use filename::{output_path, sanitize_domain};
pub use json::export_json;

use crate::config::OutputFormat;
use crate::orchestrator::PageRecord;

/// Writes `records` to `path` in `format`, creating missing parent
/// directories.
pub fn write_records(path: &Path, records: &[PageRecord], format: OutputFormat) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            info!("Creating output directory {}", dir.display());
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => export_csv(writer, records),
        OutputFormat::Json => export_json(writer, records),
    }
    .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        "Wrote {} records to {} ({:?})",
        records.len(),
        path.display(),
        format
    );
    Ok(())
}
