use clap::Parser;
use nobel_etl::utils::{logger, validation::Validate};
use nobel_etl::{
    AppConfig, CliArgs, EtlEngine, EtlError, HttpLaureateSource, LaureatePipeline, LocalStorage,
    OutputSelection,
};

fn load_config(args: &CliArgs) -> Result<AppConfig, EtlError> {
    let mut config = AppConfig::from_file(&args.config)?;
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config '{}': {}", args.config, e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let source = HttpLaureateSource::new(config.app.base_api_url.clone(), config.timeout())?;
    let storage = LocalStorage::new(config.output.directory.clone());
    let outputs = OutputSelection {
        json: args.json,
        spreadsheet: args.excel,
    };

    let engine = EtlEngine::new(LaureatePipeline::new(source, storage, config, outputs));
    let summary = engine.run().await;

    for path in &summary.written {
        println!("📁 Output saved to: {}", path);
    }

    Ok(())
}
