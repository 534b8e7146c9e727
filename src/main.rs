use anyhow::{Context, Result};
use clap::Parser;
use dessert_shop::{
    cli::{Args, CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(path) = args.catalog.clone() {
        config.catalog_path = path;
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🍰 Dessert shop starting...");
    tracing::debug!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let mut app = CliApp::new(config).await;
    app.run(args.command).await.map_err(|e| {
        tracing::error!("Dessert shop failed: {:#}", e);
        e
    })?;

    tracing::info!("🍰 Dessert shop stopped");
    Ok(())
}
