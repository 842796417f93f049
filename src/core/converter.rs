use crate::core::coerce::CellCoercion;
use crate::core::table::parse_table;
use crate::domain::model::{ConversionOutcome, Dataset, FileMapping, SkipReason};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::Path;

pub fn join_path(dir: &str, file: &str) -> String {
    Path::new(dir).join(file).to_string_lossy().into_owned()
}

/// Converts a single source table into its JSON dataset file.
pub struct DatasetConverter<'a, S: Storage> {
    storage: &'a S,
    coercion: &'a CellCoercion,
}

impl<'a, S: Storage> DatasetConverter<'a, S> {
    pub fn new(storage: &'a S, coercion: &'a CellCoercion) -> Self {
        Self { storage, coercion }
    }

    pub fn extract(&self, source_path: &str, name: &str) -> Result<Dataset> {
        if !self.storage.exists(source_path) {
            return Err(EtlError::MissingSource {
                path: source_path.to_string(),
            });
        }

        let bytes = self.storage.read_file(source_path)?;
        let records = parse_table(&bytes, self.coercion)?;
        Ok(Dataset {
            name: name.to_string(),
            records,
        })
    }

    pub fn load(&self, dataset: &Dataset, output_path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&dataset.records)?;
        tracing::debug!(
            "Writing {} ({} bytes) to {}",
            dataset.name,
            json.len(),
            output_path
        );
        self.storage.write_file(output_path, json.as_bytes())
    }

    /// Never fails: a missing or broken source is reported in the outcome.
    pub fn convert(&self, source_dir: &str, output_dir: &str, mapping: &FileMapping) -> ConversionOutcome {
        let source_path = join_path(source_dir, &mapping.source);
        let output_path = join_path(output_dir, &mapping.output);

        let result = self
            .extract(&source_path, &mapping.output)
            .and_then(|dataset| {
                self.load(&dataset, &output_path)?;
                Ok(dataset.len())
            });

        match result {
            Ok(records) => {
                tracing::info!(
                    "✅ Converted {} → {} ({} records)",
                    mapping.source,
                    mapping.output,
                    records
                );
                ConversionOutcome::Converted {
                    source: mapping.source.clone(),
                    output: mapping.output.clone(),
                    records,
                }
            }
            Err(EtlError::MissingSource { path }) => {
                tracing::warn!("⚠️ File not found: {}", path);
                ConversionOutcome::Skipped {
                    source: mapping.source.clone(),
                    output: mapping.output.clone(),
                    reason: SkipReason::MissingSource { path },
                }
            }
            Err(e) => {
                tracing::error!("❌ Error converting {}: {}", mapping.source, e);
                ConversionOutcome::Skipped {
                    source: mapping.source.clone(),
                    output: mapping.output.clone(),
                    reason: SkipReason::ConversionFailure {
                        message: e.to_string(),
                    },
                }
            }
        }
    }
}
