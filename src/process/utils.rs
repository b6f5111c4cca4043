/// Tokens a spreadsheet or dataframe export writes for an absent value.
const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 1) A raw field is missing when it is empty or one of the null tokens (exact match).
pub fn is_missing(raw: &str) -> bool {
    raw.is_empty() || NULL_TOKENS.contains(&raw)
}

/// 2) Raw field → stored value.
pub fn to_field(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// 3) Header of a positional index column: blank, or `Unnamed: N` as written
///    by dataframe tooling.
pub fn is_index_header(header: &str) -> bool {
    let h = header.trim();
    h.is_empty() || h.starts_with("Unnamed:")
}
