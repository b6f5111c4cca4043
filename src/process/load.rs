use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

use crate::error::{CleanError, Result, Stage};
use crate::process::raw_table::{RawTable, Record};
use crate::process::utils::to_field;

/// Open `path` and parse it with `load_table_from_reader`.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CleanError::io(path, e))?;
    let table = load_table_from_reader(file)?;
    info!(rows = table.len(), columns = table.headers.len(), "loaded");
    Ok(table)
}

/// Parse `;`-delimited text with a header row into a `RawTable`.
///
/// Every data row must have exactly as many fields as the header; missing
/// values (blank or a null token) are stored as `None`.
pub fn load_table_from_reader<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true) // field counts are checked per row below
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(CleanError::format(Stage::Load, None, "missing header row"));
    }

    let mut table = RawTable::new(headers);
    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = result?;
        if record.len() != table.headers.len() {
            return Err(CleanError::format(
                Stage::Load,
                Some(row),
                format!(
                    "expected {} fields, found {}",
                    table.headers.len(),
                    record.len()
                ),
            ));
        }
        let fields = record.iter().map(to_field).collect();
        table.rows.push(Record::new(row, fields));
    }

    debug!(rows = table.len(), "parsed records");
    Ok(table)
}
