use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{CleanError, Result};

pub const DEFAULT_INPUT_PATH: &str = "files/input/solicitudes_de_credito.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "files/output";
pub const DEFAULT_OUTPUT_NAME: &str = "solicitudes_de_credito.csv";

/// Where to read from and where to write to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_file_name: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl CleanerConfig {
    /// Load a YAML config; keys left out keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CleanError::io(path, e))?;
        serde_yaml::from_str(&text).map_err(|source| CleanError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }
}
