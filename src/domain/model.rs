use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One source row keyed by column name. Key order follows the source columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    pub source: String,
    pub output: String,
}

impl FileMapping {
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }
}

/// Tables exported for the dashboard, in conversion order.
pub const DEFAULT_FILE_MAP: [(&str, &str); 5] = [
    ("top_batsmen_per_season.csv", "topBatsmen.json"),
    ("economical_bowlers_powerplay.csv", "economicalBowlers.json"),
    ("toss_impact.csv", "tossImpact.json"),
    ("runs_in_wins.csv", "runsInWins.json"),
    ("match_data.csv", "matchData.json"),
];

pub const DEFAULT_SUMMARY_FILE: &str = "summary.json";

pub fn default_file_map() -> Vec<FileMapping> {
    DEFAULT_FILE_MAP
        .iter()
        .map(|(source, output)| FileMapping::new(*source, *output))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingSource { path: String },
    ConversionFailure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted {
        source: String,
        output: String,
        records: usize,
    },
    Skipped {
        source: String,
        output: String,
        reason: SkipReason,
    },
}

impl ConversionOutcome {
    pub fn output(&self) -> &str {
        match self {
            ConversionOutcome::Converted { output, .. } | ConversionOutcome::Skipped { output, .. } => {
                output
            }
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }
}

/// Output file name to record count, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCounts(Vec<(String, usize)>);

impl DatasetCounts {
    pub fn insert(&mut self, output: impl Into<String>, count: usize) {
        let output = output.into();
        match self.0.iter_mut().find(|(name, _)| *name == output) {
            Some(entry) => entry.1 = count,
            None => self.0.push((output, count)),
        }
    }

    pub fn get(&self, output: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == output)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl Serialize for DatasetCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub generated: String,
    pub datasets: DatasetCounts,
    pub total_records: usize,
}

impl Summary {
    /// Folds per-dataset outcomes; skipped entries leave no trace in the summary.
    pub fn from_outcomes(generated: impl Into<String>, outcomes: &[ConversionOutcome]) -> Self {
        let datasets = outcomes
            .iter()
            .fold(DatasetCounts::default(), |mut counts, outcome| {
                if let ConversionOutcome::Converted { output, records, .. } = outcome {
                    counts.insert(output.clone(), *records);
                }
                counts
            });
        let total_records = datasets.total();

        Self {
            generated: generated.into(),
            datasets,
            total_records,
        }
    }
}
