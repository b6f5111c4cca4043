use std::collections::HashSet;
use tracing::{debug, info, trace};

use crate::error::{Result, Stage};
use crate::process::raw_table::{RawTable, REQUIRED_COLUMNS};
use crate::process::utils::{is_index_header, is_missing};

/// What the structural pass removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StructuralOutcome {
    pub index_column_dropped: bool,
    pub dropped_missing: usize,
    pub dropped_duplicates: usize,
}

/// Drop the index column, drop incomplete rows, then drop exact duplicates.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn clean_structure(table: &mut RawTable) -> Result<StructuralOutcome> {
    let index_column_dropped = drop_index_column(table);

    for name in REQUIRED_COLUMNS {
        table.require_column(Stage::Structural, name)?;
    }

    let dropped_missing = drop_incomplete_rows(table);
    let dropped_duplicates = drop_duplicates(table);

    info!(
        index_column_dropped,
        dropped_missing,
        dropped_duplicates,
        remaining = table.len(),
        "structural pass done"
    );
    Ok(StructuralOutcome {
        index_column_dropped,
        dropped_missing,
        dropped_duplicates,
    })
}

/// Drop the leading positional index column if there is one.
pub fn drop_index_column(table: &mut RawTable) -> bool {
    match table.headers.first() {
        Some(h) if is_index_header(h) => {
            let name = table.drop_column(0);
            debug!(column = %name, "dropped index column");
            true
        }
        _ => {
            debug!("no index column");
            false
        }
    }
}

/// Remove every row holding a missing value; returns how many went.
pub fn drop_incomplete_rows(table: &mut RawTable) -> usize {
    let before = table.len();
    table.rows.retain(|r| {
        let keep = !r.has_missing();
        if !keep {
            trace!(row = r.row, "dropping row with missing field");
        }
        keep
    });
    before - table.len()
}

/// Remove rows that normalization left with an empty value or a null token
/// (`"_"` trims to `""`, `"Null"` lowercases to `"null"`).
pub fn drop_emptied_rows(table: &mut RawTable) -> usize {
    let before = table.len();
    table.rows.retain(|r| {
        let keep = r.fields.iter().all(|f| f.as_deref().is_some_and(|v| !is_missing(v)));
        if !keep {
            trace!(row = r.row, "dropping row emptied by normalization");
        }
        keep
    });
    before - table.len()
}

/// Keep the first occurrence of each distinct row (compared on every field).
pub fn drop_duplicates(table: &mut RawTable) -> usize {
    let before = table.len();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(before);
    table.rows.retain(|r| {
        let first = seen.insert(r.fields.clone());
        if !first {
            trace!(row = r.row, "dropping duplicate row");
        }
        first
    });
    before - table.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;
    use crate::process::raw_table::Record;

    fn headers(with_index: bool) -> Vec<String> {
        let mut h: Vec<String> = Vec::new();
        if with_index {
            h.push(String::new());
        }
        h.extend(REQUIRED_COLUMNS.iter().map(|c| c.to_string()));
        h
    }

    fn row(n: usize, idx: Option<&str>, vals: [Option<&str>; 7]) -> Record {
        let mut f: Vec<Option<String>> = Vec::new();
        if let Some(i) = idx {
            f.push(Some(i.to_string()));
        }
        f.extend(vals.iter().map(|v| v.map(str::to_string)));
        Record::new(n, f)
    }

    const A: [Option<&str>; 7] = [
        Some("7/05/2018"),
        Some("femenino"),
        Some("tienda"),
        Some("fabricacion"),
        Some("microempresarial"),
        Some("belen"),
        Some("$2,000,000.00"),
    ];

    #[test]
    fn index_column_is_dropped_before_dedup() {
        // identical rows that differ only in the positional index
        let mut t = RawTable::new(headers(true));
        t.rows.push(row(1, Some("0"), A));
        t.rows.push(row(2, Some("1"), A));

        let out = clean_structure(&mut t).unwrap();
        assert!(out.index_column_dropped);
        assert_eq!(out.dropped_duplicates, 1);
        assert_eq!(t.len(), 1);
        assert_eq!(t.headers.len(), 7);
        assert_eq!(t.rows[0].row, 1);
    }

    #[test]
    fn rows_with_missing_fields_are_dropped() {
        let mut b = A;
        b[5] = None;
        let mut t = RawTable::new(headers(true));
        t.rows.push(row(1, Some("0"), b));
        t.rows.push(row(2, Some("1"), A));

        let out = clean_structure(&mut t).unwrap();
        assert_eq!(out.dropped_missing, 1);
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows[0].row, 2);
    }

    #[test]
    fn named_first_column_is_kept() {
        let mut t = RawTable::new(headers(false));
        t.rows.push(row(1, None, A));

        let out = clean_structure(&mut t).unwrap();
        assert!(!out.index_column_dropped);
        assert_eq!(t.headers[0], "fecha_de_beneficio");
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let mut t = RawTable::new(vec!["".into(), "sexo".into()]);
        let err = clean_structure(&mut t).unwrap_err();
        assert!(matches!(
            err,
            CleanError::MissingColumn { stage: Stage::Structural, .. }
        ));
    }

    #[test]
    fn rows_emptied_by_normalization_are_dropped() {
        let mut emptied = A;
        emptied[2] = Some("");
        let mut null_token = A;
        null_token[3] = Some("null");
        let mut t = RawTable::new(headers(false));
        t.rows.push(row(1, None, emptied));
        t.rows.push(row(2, None, A));
        t.rows.push(row(3, None, null_token));

        assert_eq!(drop_emptied_rows(&mut t), 2);
        let kept: Vec<usize> = t.rows.iter().map(|r| r.row).collect();
        assert_eq!(kept, vec![2]);
    }

    #[test]
    fn duplicates_keep_first_occurrence_order() {
        let mut b = A;
        b[1] = Some("masculino");
        let mut t = RawTable::new(headers(false));
        t.rows.push(row(1, None, A));
        t.rows.push(row(2, None, b));
        t.rows.push(row(3, None, A));
        t.rows.push(row(4, None, b));

        assert_eq!(drop_duplicates(&mut t), 2);
        let kept: Vec<usize> = t.rows.iter().map(|r| r.row).collect();
        assert_eq!(kept, vec![1, 2]);
    }
}
