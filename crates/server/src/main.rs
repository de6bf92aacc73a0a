use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod config;
pub(crate) mod database;
pub(crate) mod error;
pub(crate) mod gallery;
pub(crate) mod media;
pub(crate) mod models;
pub(crate) mod render;
pub(crate) mod server;
pub(crate) mod utils;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the YAML config.
    #[arg(long, default_value = "config.yaml")]
    config: String,
    /// Drop and recreate the Postgres schema before serving.
    #[arg(long)]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_yaml_file(&args.config)?;
    server::run_all(&config, args.init_schema).await?;

    Ok(())
}
