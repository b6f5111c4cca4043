use tracing::{info, trace};

use crate::error::{CleanError, Result, Stage};
use crate::process::raw_table::{RawTable, FECHA_DE_BENEFICIO};

/// A year component has at least this many characters.
const YEAR_LEN: usize = 4;

fn is_year(component: &str) -> bool {
    component.chars().count() >= YEAR_LEN
}

/// Already `Y-M-D` with the year first (e.g. output of a previous run).
fn is_canonical(s: &str) -> bool {
    if s.contains('/') {
        return false;
    }
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == 3 && is_year(parts[0]) && !is_year(parts[1]) && !is_year(parts[2])
}

/// Rewrite `"D/M/Y"` or `"Y/M/D"` as `"Y-M-D"`.
///
/// The year is the one component of 4+ characters. When the last component is
/// shorter than that the value is year-first, so first and last swap places;
/// the month never moves. Component text is kept verbatim (no padding, no
/// range checks).
pub fn normalize_date(raw: &str) -> std::result::Result<String, String> {
    if is_canonical(raw) {
        return Ok(raw.to_string());
    }

    let mut parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return Err(format!(
            "`{}` does not split into 3 `/`-separated components",
            raw
        ));
    }

    let years = parts.iter().filter(|p| is_year(p)).count();
    if years != 1 {
        return Err(format!(
            "`{}` has {} components of {}+ characters, expected exactly 1",
            raw, years, YEAR_LEN
        ));
    }

    if !is_year(parts[2]) {
        parts.swap(0, 2);
    }
    if !is_year(parts[2]) {
        return Err(format!("`{}` has the year in the month position", raw));
    }

    let (day, month, year) = (parts[0], parts[1], parts[2]);
    Ok(format!("{}-{}-{}", year, month, day))
}

/// Normalize every `fecha_de_beneficio` in place.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn normalize_dates(table: &mut RawTable) -> Result<()> {
    let idx = table.require_column(Stage::Date, FECHA_DE_BENEFICIO)?;
    let mut rewritten = 0usize;
    table.try_map_column(idx, |row, value| {
        let out = normalize_date(value)
            .map_err(|msg| CleanError::format(Stage::Date, Some(row), msg))?;
        if out != value {
            rewritten += 1;
            trace!(row, from = value, to = %out, "date rewritten");
        }
        Ok(out)
    })?;
    info!(rewritten, "dates normalized");
    Ok(())
}
