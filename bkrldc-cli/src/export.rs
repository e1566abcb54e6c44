//! Writing the projected table as CSV or JSON lines.

use anyhow::{Context, Result};
use bkrldc_ingest::FinalRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row first, one line per record. The header is written even for an empty table.
pub fn write_csv<W: Write>(writer: W, records: &[FinalRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(FinalRecord::HEADERS)
        .context("write csv header")?;
    for record in records {
        wtr.serialize(record).context("write csv row")?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

pub fn write_csv_file(path: &Path, records: &[FinalRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(file, records).with_context(|| format!("write {}", path.display()))
}

pub fn write_json_lines<W: Write>(mut writer: W, records: &[FinalRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record).context("serialize record")?;
        writeln!(writer)?;
    }
    Ok(())
}
