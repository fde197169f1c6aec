use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use epm_cli::{run, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = run(&cli).map_err(|e| {
        error!("{:#}", e);
        e
    })?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
