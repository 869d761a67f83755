//! JSON export functionality.

use anyhow::Result;
use std::io::Write;

use crate::orchestrator::PageRecord;

/// Writes all records as one pretty-printed JSON array.
pub fn export_json<W: Write>(mut writer: W, records: &[PageRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
