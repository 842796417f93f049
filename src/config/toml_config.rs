use crate::core::ConfigProvider;
use crate::domain::model::{default_file_map, FileMapping, DEFAULT_SUMMARY_FILE};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_file_map, validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SOURCE_DIR: &str = "./data";
pub const DEFAULT_OUTPUT_DIR: &str = "./public/data";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Replaces the built-in table list when present.
    #[serde(default = "default_file_map")]
    pub datasets: Vec<FileMapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Extra cell values read as null, on top of empty cells.
    #[serde(default)]
    pub null_values: Vec<String>,
}

fn default_source_dir() -> String {
    DEFAULT_SOURCE_DIR.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_summary_file() -> String {
    DEFAULT_SUMMARY_FILE.to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            summary_file: default_summary_file(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            conversion: ConversionConfig::default(),
            datasets: default_file_map(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("paths.source_dir", &self.paths.source_dir)?;
        validate_path("paths.output_dir", &self.paths.output_dir)?;
        validate_file_map(&self.datasets, &self.paths.summary_file)?;

        for token in &self.conversion.null_values {
            validate_non_empty_string("conversion.null_values", token)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_dir(&self) -> &str {
        &self.paths.source_dir
    }

    fn output_dir(&self) -> &str {
        &self.paths.output_dir
    }

    fn summary_file(&self) -> &str {
        &self.paths.summary_file
    }

    fn file_map(&self) -> &[FileMapping] {
        &self.datasets
    }

    fn null_values(&self) -> &[String] {
        &self.conversion.null_values
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
