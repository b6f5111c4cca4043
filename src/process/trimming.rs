use tracing::info;

use crate::error::{Result, Stage};
use crate::process::raw_table::{
    RawTable, BARRIO, IDEA_NEGOCIO, LINEA_CREDITO, SEXO, TIPO_DE_EMPRENDIMIENTO,
};

/// Categorical columns that are also trimmed.
pub const TRIMMED_COLUMNS: [&str; 4] = [SEXO, TIPO_DE_EMPRENDIMIENTO, IDEA_NEGOCIO, LINEA_CREDITO];

/// Lowercase and turn `-` / `_` into spaces.
pub fn fold_separators(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect()
}

/// `fold_separators`, then strip surrounding whitespace.
pub fn normalize_category(raw: &str) -> String {
    fold_separators(raw).trim().to_string()
}

/// Apply categorical normalization to the flagged columns. `barrio` is folded
/// but keeps its surrounding whitespace.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn apply_categorical(table: &mut RawTable) -> Result<()> {
    for name in TRIMMED_COLUMNS {
        let idx = table.require_column(Stage::Categorical, name)?;
        table.map_column(idx, normalize_category);
    }

    let idx = table.require_column(Stage::Categorical, BARRIO)?;
    table.map_column(idx, fold_separators);

    info!(
        columns = TRIMMED_COLUMNS.len() + 1,
        "categorical columns normalized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::raw_table::Record;

    #[test]
    fn separators_become_spaces() {
        assert_eq!(normalize_category("Comercio-Informal"), "comercio informal");
        assert_eq!(normalize_category(" Micro_Empresarial "), "micro empresarial");
        assert_eq!(normalize_category("a--b"), "a  b");
        assert_eq!(normalize_category("-Tienda-"), "tienda");
    }

    #[test]
    fn lowercase_handles_accents() {
        assert_eq!(normalize_category("LÍNEA_Crédito"), "línea crédito");
    }

    #[test]
    fn barrio_keeps_surrounding_whitespace() {
        assert_eq!(fold_separators(" San_José-"), " san josé ");
    }

    #[test]
    fn table_columns_are_normalized() {
        let headers: Vec<String> = TRIMMED_COLUMNS
            .iter()
            .chain(std::iter::once(&BARRIO))
            .map(|c| c.to_string())
            .collect();
        let mut t = RawTable::new(headers);
        t.rows.push(Record::new(
            1,
            vec![
                Some("FEMENINO ".into()),
                Some("Comercio-Informal".into()),
                Some("Venta_De_Ropa".into()),
                Some("MicroEmpresarial".into()),
                Some("_Belen-".into()),
            ],
        ));

        apply_categorical(&mut t).unwrap();
        let got: Vec<&str> = t.rows[0].fields.iter().map(|f| f.as_deref().unwrap()).collect();
        assert_eq!(
            got,
            vec![
                "femenino",
                "comercio informal",
                "venta de ropa",
                "microempresarial",
                " belen "
            ]
        );
    }
}
