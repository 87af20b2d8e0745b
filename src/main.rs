use anyhow::Context;
use clap::Parser;
use pedigree_scan::config::{Args, Config};
use pedigree_scan::orchestrator::ScanSession;
use pedigree_scan::server;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; logs go to stderr so one-shot JSON stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let scan = args.scan.clone();
    let config = Config::from(args);

    tracing::info!("Starting pedigree-scan v{}", env!("CARGO_PKG_VERSION"));

    match scan {
        Some(path) => scan_file(&config, &path).await,
        None => {
            tracing::info!("Binding to {}:{}", config.host, config.port);
            server::run(config).await
        }
    }
}

/// Scan one certificate and print the outcome as JSON
async fn scan_file(config: &Config, path: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let pipeline = server::build_pipeline(config)?;
    let session = ScanSession::new(Arc::new(pipeline));

    let outcome = session
        .scan(bytes, |percent| tracing::debug!("Scanning... {}%", percent))
        .await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
