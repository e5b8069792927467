//! CSV loader for detail rows.
//!
//! ## CSV Format
//!
//! Columns are matched by header name; every column is optional.
//!
//! | Column    | Type    | Notes                                   |
//! |-----------|---------|-----------------------------------------|
//! | `account` | string  | Leave empty for no account              |
//! | `debit`   | decimal | Kept as entered, e.g. `1,250.00`        |
//! | `credit`  | decimal | Kept as entered                         |
//! | `notes`   | string  |                                         |
//!
//! ```csv
//! account,debit,credit,notes
//! cash,100.00,,opening balance
//! equity,,100.00,
//! ```
//!
//! Rows are indexed by their position in the file.
use std::path::Path;

use ledger_core::DetailRow;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    account: String,
    #[serde(default)]
    debit: String,
    #[serde(default)]
    credit: String,
    #[serde(default)]
    notes: String,
}

/// Errors that can occur while loading detail rows.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("could not read detail rows: {0}")]
    Io(#[from] std::io::Error),
}

fn convert_row(
    row: CsvRow,
    index: usize,
) -> DetailRow {
    DetailRow {
        index,
        account: Some(row.account).filter(|a| !a.is_empty()),
        debit: row.debit,
        credit: row.credit,
        notes: row.notes,
    }
}

/// Parses CSV text into detail rows, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] when the CSV is structurally invalid.
pub fn load_from_str(input: &str) -> Result<Vec<DetailRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let rows = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(index, result)| Ok(convert_row(result?, index)))
        .collect::<Result<Vec<_>, CsvLoadError>>()?;

    debug!(rows = rows.len(), "detail rows loaded");
    Ok(rows)
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<DetailRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
