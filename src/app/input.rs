//! Input file reading.
//!
//! URLs come from a TXT file (one per line) or a CSV file (first column).
//! Blank lines and lines starting with `#` are ignored in both; anything
//! that is not an `http`/`https` URL is logged and skipped.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::url::validate_url;

/// Reads the URLs listed in `path`. The format follows the extension:
/// `.csv` is read as CSV, anything else as plain text.
pub fn read_input_file(path: &Path) -> Result<Vec<String>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    info!(
        "Reading URLs from {} ({} format)",
        path.display(),
        if is_csv { "CSV" } else { "TXT" }
    );

    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;

    let urls = if is_csv {
        parse_csv(file).with_context(|| format!("Failed to read CSV file {}", path.display()))?
    } else {
        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        parse_txt(&content)
    };

    if urls.is_empty() {
        warn!("No valid URLs found in {}", path.display());
    } else {
        info!("Read {} valid URLs from {}", urls.len(), path.display());
    }
    Ok(urls)
}

/// Parses one URL per line.
pub fn parse_txt(content: &str) -> Vec<String> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| accept_entry(line, i + 1))
        .collect()
}

/// Parses URLs from the first column of CSV data.
///
/// The first row is treated as a header, and skipped, when its first cell
/// is not an `http(s)://` URL.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut urls = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        let Some(first) = row.get(0) else {
            continue;
        };
        if i == 0 && !looks_like_url(first) {
            debug!("Skipping CSV header row: {:?}", row);
            continue;
        }
        if let Some(url) = accept_entry(first, i + 1) {
            urls.push(url);
        }
    }
    Ok(urls)
}

fn looks_like_url(cell: &str) -> bool {
    let lowered = cell.trim().to_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn accept_entry(raw: &str, line_number: usize) -> Option<String> {
    let entry = raw.trim();
    if entry.is_empty() {
        return None;
    }
    if entry.starts_with('#') {
        debug!("Skipping comment on line {}: {}", line_number, entry);
        return None;
    }
    let accepted = validate_url(entry);
    if accepted.is_none() {
        warn!("Skipping line {}: not an http(s) URL", line_number);
    }
    accepted
}
