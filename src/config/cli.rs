use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "dataset-prep")]
#[command(about = "Convert dashboard CSV exports into JSON datasets")]
pub struct CliConfig {
    /// Directory holding the exported CSV tables [default: ./data]
    #[arg(long)]
    pub source_dir: Option<String>,

    /// Directory the JSON datasets and summary are written to [default: ./public/data]
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Show what would be converted without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Loads the config file if one was given, then applies explicit flags on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(source_dir) = &self.source_dir {
            config.paths.source_dir = source_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.paths.output_dir = output_dir.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::parse_from(["dataset-prep"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.source_dir(), "./data");
        assert_eq!(config.output_dir(), "./public/data");
        assert_eq!(cli.log_format, LogFormat::Compact);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[paths]\nsource_dir = \"/from/file\"\noutput_dir = \"/out/file\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "dataset-prep",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--output-dir",
            "/out/flag",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.source_dir(), "/from/file");
        assert_eq!(config.output_dir(), "/out/flag");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = CliConfig::parse_from(["dataset-prep", "-c", "/no/such/config.toml"]);
        assert!(cli.resolve().is_err());
    }
}
