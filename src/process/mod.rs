//! The cleaning pipeline: load, structural pass, date/categorical/monetary
//! normalization, second dedup, write. Stage order matters: the second dedup
//! only finds rows that normalization made identical.

pub mod convert;
pub mod date_parser;
pub mod load;
pub mod raw_table;
pub mod report;
pub mod structural;
pub mod trimming;
pub mod utils;
pub mod write;

use tracing::info;

use crate::config::CleanerConfig;
use crate::error::Result;

pub use raw_table::{RawTable, Record};
pub use report::CleanReport;

/// Run every in-memory stage over `table`. Nothing is written.
pub fn clean_table(table: &mut RawTable) -> Result<CleanReport> {
    let mut report = CleanReport::start(table.len());

    let structural = structural::clean_structure(table)?;
    report.index_column_dropped = structural.index_column_dropped;
    report.dropped_missing = structural.dropped_missing;
    report.dropped_duplicates_initial = structural.dropped_duplicates;

    date_parser::normalize_dates(table)?;
    trimming::apply_categorical(table)?;
    report.coerced_amounts = convert::convert_amounts(table)?;

    let emptied = structural::drop_emptied_rows(table);
    report.dropped_missing += emptied;
    info!(dropped = emptied, "rows emptied by normalization removed");

    report.dropped_duplicates_final = structural::drop_duplicates(table);
    info!(
        dropped = report.dropped_duplicates_final,
        remaining = table.len(),
        "post-normalization dedup done"
    );

    Ok(report)
}

/// Read `config.input_path`, clean it, and write the result under
/// `config.output_dir`. The output directory is only touched once every
/// stage has succeeded.
#[tracing::instrument(level = "info", skip(config), fields(input = %config.input_path.display()))]
pub fn clean_file(config: &CleanerConfig) -> Result<CleanReport> {
    let mut table = load::load_table(&config.input_path)?;
    let mut report = clean_table(&mut table)?;

    let path = write::write_table(&table, &config.output_dir, &config.output_file_name)?;
    report.finish(path, table.len());

    info!(
        rows_read = report.rows_read,
        rows_written = report.rows_written,
        rows_dropped = report.rows_dropped(),
        coerced_amounts = report.coerced_amounts,
        "cleaning complete"
    );
    Ok(report)
}
