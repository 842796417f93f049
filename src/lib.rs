//! Converts the dashboard's CSV exports into JSON datasets plus a `summary.json` manifest.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::etl::{EtlEngine, RunReport};
pub use crate::domain::model::{default_file_map, ConversionOutcome, FileMapping, SkipReason, Summary};
pub use crate::utils::error::{EtlError, Result};

/// Converts every table in `file_map` from `source_dir` into `output_dir` on the local
/// filesystem and returns the summary that was written alongside the datasets.
pub fn convert_all(source_dir: &str, output_dir: &str, file_map: &[FileMapping]) -> Result<Summary> {
    let engine = EtlEngine::new(LocalStorage::new());
    let report = engine.run(source_dir, output_dir, file_map)?;
    Ok(report.summary)
}
