//! CSV output backend.
//!
//! Writes a BOM-prefixed UTF-8 CSV so the output opens correctly in
//! spreadsheet tools that assume a BOM marks UTF-8 (the same interoperability
//! concern the reference export scripts' upstream consumers have).

use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use csv::Writer;

use crate::error::{ExportError, ExportResult};
use crate::row::TravelTimeRow;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const HEADER: [&str; 4] = ["src_station", "dst_station", "seconds", "minutes"];

/// Writes `TravelTimeRow`s to a single BOM-prefixed UTF-8 CSV file.
pub struct CsvExporter {
    writer: Writer<File>,
    finished: bool,
}

impl CsvExporter {
    pub fn create(path: &Path) -> ExportResult<Self> {
        let mut file = File::create(path)?;
        file.write_all(UTF8_BOM)?;
        let mut writer = Writer::from_writer(file);
        writer.write_record(HEADER)?;
        Ok(Self { writer, finished: false })
    }

    pub fn write_row(&mut self, row: &TravelTimeRow) -> ExportResult<()> {
        self.writer.write_record([
            row.src_station.as_str(),
            row.dst_station.as_str(),
            &row.seconds.to_string(),
            &row.minutes().to_string(),
        ])?;
        Ok(())
    }

    /// Flush and close the underlying file. Idempotent — safe to call more
    /// than once.
    pub fn finish(&mut self) -> ExportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write the full all-pairs matrix, sorted by `(src_station, dst_station)`.
pub fn write_all_pairs(path: &Path, rows: &[TravelTimeRow]) -> ExportResult<()> {
    if rows.is_empty() {
        return Err(ExportError::EmptyOutput(path.display().to_string()));
    }
    let mut sorted = rows.to_vec();
    sorted.sort_unstable_by(|a, b| (a.src_station.as_str(), a.dst_station.as_str()).cmp(&(b.src_station.as_str(), b.dst_station.as_str())));

    let mut exporter = CsvExporter::create(path)?;
    for row in &sorted {
        exporter.write_row(row)?;
    }
    exporter.finish()
}

/// Write a single-source matrix, sorted by destination name.
pub fn write_single_source(path: &Path, source: &str, times: &[(String, i64)]) -> ExportResult<()> {
    if times.is_empty() {
        return Err(ExportError::EmptyOutput(path.display().to_string()));
    }
    let mut sorted = times.to_vec();
    sorted.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut exporter = CsvExporter::create(path)?;
    for (dst, seconds) in &sorted {
        exporter.write_row(&TravelTimeRow {
            src_station: source.to_string(),
            dst_station: dst.clone(),
            seconds: *seconds,
        })?;
    }
    exporter.finish()
}
