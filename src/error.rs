use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Pipeline stage, used to tag fatal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Structural,
    Date,
    Categorical,
    Monetary,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Structural => "structural",
            Stage::Date => "date",
            Stage::Categorical => "categorical",
            Stage::Monetary => "monetary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CleanError {
    /// Malformed input: bad header, ragged row, undecomposable date.
    #[error("format error in {stage} stage{}: {message}", row_suffix(.row))]
    Format {
        stage: Stage,
        row: Option<usize>,
        message: String,
    },

    #[error("required column `{column}` is missing in {stage} stage")]
    MissingColumn { stage: Stage, column: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to move finished output into {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CleanError {
    pub fn format(stage: Stage, row: Option<usize>, message: impl Into<String>) -> Self {
        CleanError::Format {
            stage,
            row,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanError::Io {
            path: path.into(),
            source,
        }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {}", r),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_stage_and_row() {
        let err = CleanError::format(Stage::Date, Some(7), "expected 3 components");
        assert_eq!(
            err.to_string(),
            "format error in date stage at row 7: expected 3 components"
        );

        let err = CleanError::format(Stage::Load, None, "missing header row");
        assert_eq!(err.to_string(), "format error in load stage: missing header row");
    }

    #[test]
    fn missing_column_names_stage() {
        let err = CleanError::MissingColumn {
            stage: Stage::Monetary,
            column: "monto_del_credito".into(),
        };
        assert_eq!(
            err.to_string(),
            "required column `monto_del_credito` is missing in monetary stage"
        );
    }
}
