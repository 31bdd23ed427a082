//! CSV persistence for summary rows.
//!
//! The whole table is written in one pass once every report has been parsed.

use chrono::{DateTime, Local};
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::error::SummaryError;
use crate::summary::{HEADERS, SummaryRow};

/// Logs a summary row using Rust's debug pretty-print format.
pub fn print_pretty(row: &SummaryRow) {
    debug!("{:#?}", row);
}

/// `lighthouse_summary_<YYYYMMDD_HHMM>.csv` for the given local time.
pub fn summary_file_name(at: DateTime<Local>) -> String {
    format!("lighthouse_summary_{}.csv", at.format("%Y%m%d_%H%M"))
}

/// Writes all rows to a new CSV file at `path`, header first.
///
/// The header is written explicitly so an empty table still has one.
pub fn write_summary(path: &Path, rows: &[SummaryRow]) -> Result<(), SummaryError> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV summary");

    write_rows(path, rows).map_err(|source| SummaryError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "Summary written");
    Ok(())
}

fn write_rows(path: &Path, rows: &[SummaryRow]) -> csv::Result<()> {
    let file = File::create(path)?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
