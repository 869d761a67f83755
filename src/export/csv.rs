//! CSV export functionality.
//!
//! One row per URL, columns in record field order. Absent values (no status
//! code, reserved fields) are written as empty cells.

use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;

use crate::orchestrator::PageRecord;

/// Writes a header row and one row per record.
///
/// The header is written even when there are no records.
pub fn export_csv<W: Write>(writer: W, records: &[PageRecord]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(PageRecord::FIELD_NAMES)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
