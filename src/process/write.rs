use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{CleanError, Result};
use crate::process::raw_table::RawTable;

/// Serialize `table` as `;`-delimited text: header first, rows in order.
pub fn write_table_to<W: Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(&table.headers)?;
    for record in &table.rows {
        wtr.write_record(record.fields.iter().map(|f| f.as_deref().unwrap_or("")))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `table` to `out_dir/file_name`, creating `out_dir` if needed.
///
/// Rows go to a temp file in `out_dir` first, which is renamed over the final
/// path once fully flushed; on error the temp file is removed on drop.
#[tracing::instrument(level = "info", skip(table, out_dir), fields(out_dir = %out_dir.as_ref().display()))]
pub fn write_table<P: AsRef<Path>>(table: &RawTable, out_dir: P, file_name: &str) -> Result<PathBuf> {
    // 1) Ensure the destination directory exists
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| CleanError::io(out_dir, e))?;
    let final_path = out_dir.join(file_name);

    // 2) Write everything into a temp file next to the target
    let tmp = NamedTempFile::new_in(out_dir).map_err(|e| CleanError::io(out_dir, e))?;
    {
        let mut buf = BufWriter::new(tmp.as_file());
        write_table_to(table, &mut buf)?;
        buf.flush().map_err(|e| CleanError::io(tmp.path(), e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| CleanError::io(tmp.path(), e))?;

    // 3) Rename over the final path
    tmp.persist(&final_path).map_err(|e| CleanError::Persist {
        path: final_path.clone(),
        source: e,
    })?;

    info!(rows = table.len(), path = %final_path.display(), "wrote cleaned table");
    Ok(final_path)
}
