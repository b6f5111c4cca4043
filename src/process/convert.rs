use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{Result, Stage};
use crate::process::raw_table::{RawTable, MONTO_DEL_CREDITO};

static CURRENCY_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$, ]").unwrap());

static PLAIN_DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]*)(?:\.[0-9]*)?$").unwrap());

/// Parse a formatted amount into whole units, dropping any fraction.
///
/// Plain `digits[.digits]` text is read digit-exact; other numeric forms
/// (exponents, a leading `+`) go through `f64`. Returns `None` when the text
/// does not parse, is negative or non-finite, or does not fit in a `u64`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let stripped = CURRENCY_NOISE.replace_all(raw, "");
    let text = stripped.trim();

    if let Some(caps) = PLAIN_DECIMAL.captures(text) {
        if text.bytes().any(|b| b.is_ascii_digit()) {
            let int_part = &caps[1];
            if int_part.is_empty() {
                return Some(0);
            }
            return int_part.parse().ok();
        }
    }

    let value: f64 = text.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as u64)
}

/// `parse_amount`, falling back to zero. The flag tells whether it fell back.
pub fn normalize_amount(raw: &str) -> (String, bool) {
    match parse_amount(raw) {
        Some(v) => (v.to_string(), false),
        None => ("0".to_string(), true),
    }
}

/// Canonicalize `monto_del_credito`; returns how many values were coerced to 0.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn convert_amounts(table: &mut RawTable) -> Result<usize> {
    let idx = table.require_column(Stage::Monetary, MONTO_DEL_CREDITO)?;
    let mut coerced = 0usize;
    table.try_map_column(idx, |row, value| {
        let (out, fell_back) = normalize_amount(value);
        if fell_back {
            coerced += 1;
            debug!(row, value, "unparseable amount coerced to 0");
        }
        Ok(out)
    })?;
    info!(coerced, "amounts normalized");
    Ok(coerced)
}
