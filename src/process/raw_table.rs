use crate::error::{CleanError, Result, Stage};

pub const FECHA_DE_BENEFICIO: &str = "fecha_de_beneficio";
pub const SEXO: &str = "sexo";
pub const TIPO_DE_EMPRENDIMIENTO: &str = "tipo_de_emprendimiento";
pub const IDEA_NEGOCIO: &str = "idea_negocio";
pub const LINEA_CREDITO: &str = "línea_credito";
pub const BARRIO: &str = "barrio";
pub const MONTO_DEL_CREDITO: &str = "monto_del_credito";

/// Columns that must survive the structural pass.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    FECHA_DE_BENEFICIO,
    SEXO,
    TIPO_DE_EMPRENDIMIENTO,
    IDEA_NEGOCIO,
    LINEA_CREDITO,
    BARRIO,
    MONTO_DEL_CREDITO,
];

/// One data row of the credit-request file.
#[derive(Debug, Clone)]
pub struct Record {
    /// 1-based data-row number in the source file (header excluded).
    pub row: usize,
    /// One entry per header; `None` is a missing value.
    pub fields: Vec<Option<String>>,
}

impl Record {
    pub fn new(row: usize, fields: Vec<Option<String>>) -> Self {
        Self { row, fields }
    }

    pub fn has_missing(&self) -> bool {
        self.fields.iter().any(Option::is_none)
    }
}

#[derive(Debug, Default)]
pub struct RawTable {
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<Record>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, stage: Stage, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| CleanError::MissingColumn {
                stage,
                column: name.to_string(),
            })
    }

    /// Remove column `idx` from the header and every row.
    pub fn drop_column(&mut self, idx: usize) -> String {
        let name = self.headers.remove(idx);
        for record in &mut self.rows {
            record.fields.remove(idx);
        }
        name
    }

    /// Apply `f` to every present value of column `idx`.
    pub fn map_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for record in &mut self.rows {
            if let Some(value) = record.fields[idx].as_mut() {
                *value = f(value);
            }
        }
    }

    /// Like `map_column`, but `f` may reject a value; the row number is handed in
    /// so the error can point at it.
    pub fn try_map_column<F>(&mut self, idx: usize, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &str) -> Result<String>,
    {
        for record in &mut self.rows {
            let row = record.row;
            if let Some(value) = record.fields[idx].as_mut() {
                *value = f(row, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        let mut t = RawTable::new(vec!["".into(), "sexo".into(), "barrio".into()]);
        t.rows.push(Record::new(1, vec![Some("0".into()), Some("F".into()), None]));
        t.rows.push(Record::new(2, vec![Some("1".into()), Some("M".into()), Some("x".into())]));
        t
    }

    #[test]
    fn drop_column_removes_header_and_fields() {
        let mut t = sample();
        assert_eq!(t.drop_column(0), "");
        assert_eq!(t.headers, vec!["sexo", "barrio"]);
        assert!(t.rows.iter().all(|r| r.fields.len() == 2));
        assert_eq!(t.rows[1].fields[0].as_deref(), Some("M"));
    }

    #[test]
    fn map_column_skips_missing_values() {
        let mut t = sample();
        let idx = t.column_index("barrio").unwrap();
        t.map_column(idx, |v| v.to_uppercase());
        assert_eq!(t.rows[0].fields[idx], None);
        assert_eq!(t.rows[1].fields[idx].as_deref(), Some("X"));
    }

    #[test]
    fn require_column_reports_name() {
        let t = sample();
        let err = t.require_column(Stage::Monetary, "monto_del_credito").unwrap_err();
        assert!(matches!(
            err,
            CleanError::MissingColumn { stage: Stage::Monetary, ref column } if column == "monto_del_credito"
        ));
    }
}
