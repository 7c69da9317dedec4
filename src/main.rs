use clap::Parser;
use itp_report::config::ResolvedConfig;
use itp_report::utils::{logger, validation::Validate};
use itp_report::{CliConfig, LocalStorage, ReportEngine, ReportPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting itp-report");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match ResolvedConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_dir());
    let pipeline = ReportPipeline::new(storage, config);
    let engine = ReportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Report build completed");
            println!("Report data saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Report build failed: {}", e);
            eprintln!("Report build failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
