use clap::Parser;
use nachweis_etl::utils::error::ErrorSeverity;
use nachweis_etl::utils::{logger, validation::Validate};
use nachweis_etl::{BatchEngine, CliConfig, ConvertError, LocalStorage, ReportPipeline, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting nachweis-etl");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match Settings::from_cli(&cli).and_then(|s| s.validate().map(|()| s)) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    tracing::debug!("Settings: {:?}", settings);

    let input = LocalStorage::new(settings.input_path.clone());
    let output = LocalStorage::new(settings.output_path.clone());
    let engine = BatchEngine::new(ReportPipeline::new(input, output, settings));

    match engine.run().await {
        Ok(summary) => {
            if let Some(archive_path) = &summary.archive_path {
                println!("📁 Created: {}", archive_path);
            }
            println!(
                "Summary: {} successful, {} failed",
                summary.converted(),
                summary.failed()
            );
            for failure in &summary.failures {
                println!("  - {}: {}", failure.file, failure.error);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &ConvertError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
