use crate::core::coerce::CellCoercion;
use crate::core::converter::{join_path, DatasetConverter};
use crate::domain::model::{ConversionOutcome, FileMapping, Summary, DEFAULT_SUMMARY_FILE};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use chrono::{Local, SecondsFormat};

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: Vec<ConversionOutcome>,
    pub summary: Summary,
    pub summary_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedConversion {
    pub mapping: FileMapping,
    pub source_path: String,
    pub output_path: String,
    pub source_exists: bool,
}

pub struct EtlEngine<S: Storage> {
    storage: S,
    coercion: CellCoercion,
    summary_file: String,
}

impl<S: Storage> EtlEngine<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            coercion: CellCoercion::default(),
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::new(storage)
            .with_null_values(config.null_values().to_vec())
            .with_summary_file(config.summary_file())
    }

    pub fn with_null_values(mut self, null_values: Vec<String>) -> Self {
        self.coercion = CellCoercion::new(null_values);
        self
    }

    pub fn with_summary_file(mut self, summary_file: impl Into<String>) -> Self {
        self.summary_file = summary_file.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// What a run would touch, without reading or writing anything.
    pub fn plan(&self, source_dir: &str, output_dir: &str, file_map: &[FileMapping]) -> Vec<PlannedConversion> {
        file_map
            .iter()
            .map(|mapping| {
                let source_path = join_path(source_dir, &mapping.source);
                PlannedConversion {
                    mapping: mapping.clone(),
                    source_exists: self.storage.exists(&source_path),
                    source_path,
                    output_path: join_path(output_dir, &mapping.output),
                }
            })
            .collect()
    }

    /// Converts every mapped table in order and writes the summary.
    ///
    /// Per-dataset failures are recorded in the report; only failing to create the output
    /// directory or to write the summary returns an error.
    pub fn run(&self, source_dir: &str, output_dir: &str, file_map: &[FileMapping]) -> Result<RunReport> {
        tracing::info!(
            "Converting {} datasets from {} into {}",
            file_map.len(),
            source_dir,
            output_dir
        );
        self.storage.create_dir_all(output_dir)?;

        let converter = DatasetConverter::new(&self.storage, &self.coercion);
        let outcomes: Vec<ConversionOutcome> = file_map
            .iter()
            .map(|mapping| converter.convert(source_dir, output_dir, mapping))
            .collect();

        let summary = Summary::from_outcomes(timestamp_now(), &outcomes);
        let summary_path = join_path(output_dir, &self.summary_file);
        let json = serde_json::to_string_pretty(&summary)?;
        self.storage.write_file(&summary_path, json.as_bytes())?;

        tracing::info!("✅ Created {}", self.summary_file);
        tracing::info!("✅ Total records: {}", summary.total_records);
        tracing::info!("📁 All data files are in: {}", output_dir);

        Ok(RunReport {
            outcomes,
            summary,
            summary_path,
        })
    }
}

/// Local wall-clock time as ISO-8601 with offset.
pub fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::converter::tests::MemoryStorage;
    use crate::domain::model::{default_file_map, SkipReason};

    #[test]
    fn test_run_with_only_toss_impact() {
        let storage = MemoryStorage::default()
            .with_file("src/toss_impact.csv", "team,toss_won,match_won\nCSK,1,1\nMI,0,1\nRCB,1,0\n");
        let engine = EtlEngine::new(storage);

        let report = engine.run("src", "out", &default_file_map()).unwrap();

        assert_eq!(report.outcomes.len(), 5);
        assert_eq!(report.outcomes.iter().filter(|o| o.is_converted()).count(), 1);
        assert_eq!(report.summary.datasets.get("tossImpact.json"), Some(3));
        assert_eq!(report.summary.total_records, 3);
        assert_eq!(report.summary_path, "out/summary.json");

        let summary: serde_json::Value =
            serde_json::from_str(&engine.storage().get_file("out/summary.json").unwrap()).unwrap();
        assert_eq!(summary["datasets"], serde_json::json!({"tossImpact.json": 3}));
        assert_eq!(summary["totalRecords"], 3);
        assert!(engine.storage().get_file("out/topBatsmen.json").is_none());
    }

    #[test]
    fn test_outcomes_follow_file_map_order() {
        let engine = EtlEngine::new(MemoryStorage::default());
        let report = engine.run("src", "out", &default_file_map()).unwrap();

        let outputs: Vec<&str> = report.outcomes.iter().map(|o| o.output()).collect();
        assert_eq!(outputs[0], "topBatsmen.json");
        assert_eq!(outputs[4], "matchData.json");
        assert!(report.outcomes.iter().all(|o| matches!(
            o,
            ConversionOutcome::Skipped {
                reason: SkipReason::MissingSource { .. },
                ..
            }
        )));
        assert!(report.summary.datasets.is_empty());
    }

    #[test]
    fn test_custom_summary_file_and_null_values() {
        let storage = MemoryStorage::default().with_file("src/a.csv", "x\nNA\n");
        let engine = EtlEngine::new(storage)
            .with_summary_file("manifest.json")
            .with_null_values(vec!["NA".to_string()]);

        let report = engine
            .run("src", "out", &[FileMapping::new("a.csv", "a.json")])
            .unwrap();

        assert_eq!(report.summary_path, "out/manifest.json");
        let data: serde_json::Value =
            serde_json::from_str(&engine.storage().get_file("out/a.json").unwrap()).unwrap();
        assert_eq!(data, serde_json::json!([{"x": null}]));
    }

    #[test]
    fn test_summary_write_failure_is_an_error() {
        let storage = MemoryStorage {
            read_only: true,
            ..Default::default()
        };
        let engine = EtlEngine::new(storage);
        assert!(engine.run("src", "out", &default_file_map()).is_err());
    }

    #[test]
    fn test_plan_reports_existing_sources() {
        let storage = MemoryStorage::default().with_file("src/match_data.csv", "id\n1\n");
        let engine = EtlEngine::new(storage);

        let plan = engine.plan("src", "out", &default_file_map());

        let existing: Vec<&str> = plan
            .iter()
            .filter(|p| p.source_exists)
            .map(|p| p.output_path.as_str())
            .collect();
        assert_eq!(existing, vec!["out/matchData.json"]);
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let generated = timestamp_now();
        assert!(chrono::DateTime::parse_from_rfc3339(&generated).is_ok());
    }
}
