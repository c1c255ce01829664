//! Flat-table rendering of the reconciled record set.
//!
//! One row per [`SeasonRecord`] across all processed players, fixed column
//! order: the identity fields followed by the union of all tab headers.
//! CSV output is UTF-8 with a BOM so spreadsheet apps pick up non-ASCII
//! names and nationalities.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::merge::SeasonRecord;
use crate::scrape::tabs::all_stat_headers;

const IDENTITY_COLUMNS: [&str; 7] = [
    "Player",
    "Age",
    "Nationality",
    "Position",
    "Season",
    "League",
    "Category",
];

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// The full output header row.
pub fn output_columns() -> Vec<&'static str> {
    let mut columns = IDENTITY_COLUMNS.to_vec();
    columns.extend(all_stat_headers());
    columns
}

/// Write the record set as CSV to `path`.
pub fn write_csv_file(path: &Path, records: &[SeasonRecord]) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;
    write_csv(&mut file, records)
}

/// Write the record set as CSV to any writer (no BOM).
pub fn write_csv<W: Write>(writer: W, records: &[SeasonRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let columns = output_columns();
    csv.write_record(&columns)?;

    for record in records {
        let mut row: Vec<String> = Vec::with_capacity(columns.len());
        row.push(record.player.clone());
        row.push(record.age.map(|a| a.to_string()).unwrap_or_default());
        row.push(record.nationality.clone().unwrap_or_default());
        row.push(record.position.clone().unwrap_or_default());
        row.push(record.season.clone());
        row.push(record.league.clone());
        row.push(record.category.clone());
        for header in &columns[IDENTITY_COLUMNS.len()..] {
            row.push(record.stat(header).unwrap_or_default().to_string());
        }
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Render the record set as pretty JSON.
pub fn to_json(records: &[SeasonRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
