use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Counts gathered over one cleaning run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub index_column_dropped: bool,
    /// Rows removed for holding a missing value.
    pub dropped_missing: usize,
    pub dropped_duplicates_initial: usize,
    /// Rows that only became duplicates after normalization.
    pub dropped_duplicates_final: usize,
    /// Amounts that failed to parse and were set to 0.
    pub coerced_amounts: usize,
    pub rows_written: usize,
    pub output_path: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CleanReport {
    pub fn start(rows_read: usize) -> Self {
        Self {
            rows_read,
            index_column_dropped: false,
            dropped_missing: 0,
            dropped_duplicates_initial: 0,
            dropped_duplicates_final: 0,
            coerced_amounts: 0,
            rows_written: 0,
            output_path: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self, output_path: PathBuf, rows_written: usize) {
        self.output_path = Some(output_path);
        self.rows_written = rows_written;
        self.finished_at = Some(Utc::now());
    }

    pub fn rows_dropped(&self) -> usize {
        self.dropped_missing + self.dropped_duplicates_initial + self.dropped_duplicates_final
    }
}
