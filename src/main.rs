use bmkg_feed::app::{render_earthquake, render_forecast, render_regions};
use bmkg_feed::config::Command;
use bmkg_feed::core::{ConfigProvider, Storage};
use bmkg_feed::utils::error::ErrorSeverity;
use bmkg_feed::utils::{logger, validation::Validate};
use bmkg_feed::{
    AppConfig, BmkgError, CliConfig, EarthquakeClient, LocalStorage, RegionCatalog,
    ReqwestTransport, WeatherClient,
};
use clap::Parser;

fn load_config(cli: &CliConfig) -> bmkg_feed::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

async fn emit(
    storage: &LocalStorage,
    output: Option<&std::path::Path>,
    rendered: &str,
) -> bmkg_feed::Result<()> {
    match output {
        Some(path) => {
            storage
                .write_file(&path.to_string_lossy(), rendered.as_bytes())
                .await?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

async fn run(cli: &CliConfig) -> bmkg_feed::Result<()> {
    // Load configuration (defaults when no file is given)
    let config = load_config(cli)?;
    let storage = LocalStorage::new(".");

    match &cli.command {
        Command::Earthquake { format } => {
            let transport = ReqwestTransport::from_config(&config)?;
            let report = EarthquakeClient::new(transport).latest_earthquake().await;
            emit(&storage, None, &render_earthquake(report.as_ref(), *format)?).await
        }
        Command::Weather {
            region_code,
            format,
            output,
        } => {
            let transport = ReqwestTransport::from_config(&config)?;
            let forecast = WeatherClient::new(transport)
                .weather_by_region(region_code)
                .await?;
            let rendered = render_forecast(&forecast, *format)?;
            emit(&storage, output.as_deref(), &rendered).await
        }
        Command::Regions { format, code } => {
            // Configured partitions replace the bundled ones
            let catalog = if config.catalog_partitions().is_empty() {
                RegionCatalog::bundled()?
            } else {
                RegionCatalog::load(&storage, config.catalog_partitions()).await?
            };

            let regions = match code {
                Some(code) => catalog.find_by_code(code),
                None => catalog.iter().collect(),
            };
            emit(&storage, None, &render_regions(&regions, *format)?).await
        }
    }
}

fn exit_code(e: &BmkgError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // Initialize logging
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        // Show user-friendly error message
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }
}
