mod cli;
mod config;
mod error;
mod progress;
mod publisher;
mod server;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::config::Config;
use crate::progress::UploadSpinner;
use crate::publisher::{PublishRequest, Publisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.verbose {
        tracing::info!("Running relpush with verbose output");
    }

    // Load configuration and merge with arguments; fails before any
    // network activity when required settings are missing.
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;
    let publish_config = config.resolve(&args)?;

    let request = PublishRequest {
        artifacts: args.artifacts.clone(),
        version: args.release_version.clone(),
        platform: args.platform.clone(),
        arch: args.arch.clone(),
    };

    tracing::info!(
        "Publishing version {} ({} artifacts)",
        request.version,
        request.artifacts.len()
    );

    let (publisher, progress_rx) = Publisher::new(publish_config);

    let spinner = UploadSpinner::new();
    let render = tokio::spawn(spinner.run(progress_rx));

    let result = publisher.publish(&request).await;

    // Dropping the publisher closes the progress channel and ends the
    // spinner task.
    drop(publisher);
    let _ = render.await;

    let summary = result?;
    tracing::info!(
        "Publish complete: {} uploaded, {} skipped",
        summary.uploaded,
        summary.skipped
    );

    Ok(())
}
