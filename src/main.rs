use clap::Parser;
use dataset_prep::config::LogFormat;
use dataset_prep::core::ConfigProvider;
use dataset_prep::utils::{logger, validation::Validate};
use dataset_prep::{CliConfig, EtlEngine, EtlError, LocalStorage, TomlConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting dataset-prep");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let engine = EtlEngine::from_config(LocalStorage::new(), &config);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        display_plan(&engine, &config);
        return Ok(());
    }

    match engine.run(config.source_dir(), config.output_dir(), config.file_map()) {
        Ok(report) => {
            let converted = report.outcomes.iter().filter(|o| o.is_converted()).count();
            println!(
                "✅ Converted {}/{} datasets, {} records",
                converted,
                report.outcomes.len(),
                report.summary.total_records
            );
            println!("📁 Summary saved to: {}", report.summary_path);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &EtlError) -> ! {
    tracing::error!(
        "❌ dataset-prep failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

fn display_plan(engine: &EtlEngine<LocalStorage>, config: &TomlConfig) {
    println!("📋 Conversion plan:");
    println!("  Source: {}", config.source_dir());
    println!("  Output: {}", config.output_dir());
    println!("  Summary: {}", config.summary_file());
    if !config.null_values().is_empty() {
        println!("  Null values: {}", config.null_values().join(", "));
    }
    println!();

    for planned in engine.plan(config.source_dir(), config.output_dir(), config.file_map()) {
        let marker = if planned.source_exists { "✅" } else { "⚠️ missing" };
        println!("  {} {} -> {}", marker, planned.source_path, planned.output_path);
    }
}
