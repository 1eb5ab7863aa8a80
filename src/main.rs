use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod matcher;
mod s3_client;
mod store;
mod utils;

use cli::Cli;
use commands::purge::{self, Outcome};
use config::StorageConfig;
use store::S3Store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = StorageConfig::load_from_cli(&cli)?;
    let client = s3_client::create_client(&config).await;
    let store = S3Store::new(client, config.bucket.clone());

    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let outcome = purge::run(&store, &config, &mut input, &mut out).await?;

    match outcome {
        Outcome::Deleted(count) => info!(count, "purge finished"),
        Outcome::NotFound | Outcome::Cancelled => info!(?outcome, "nothing deleted"),
    }
    Ok(())
}

/// Diagnostics go to stderr so stdout only carries the purge transcript.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "warn,purge_file=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
