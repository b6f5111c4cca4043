pub mod config;
pub mod error;
pub mod process;

pub use config::CleanerConfig;
pub use error::{CleanError, Stage};
pub use process::{clean_file, clean_table, CleanReport};
