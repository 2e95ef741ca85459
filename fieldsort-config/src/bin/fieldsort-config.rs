//! Show or check the sort configuration the engine would load.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldsort_config::{ConfigSource, SortConfig, telemetry};
use fieldsort_core::Collation;
use tracing::info;

#[derive(Parser)]
#[command(name = "fieldsort-config", about = "Inspect fieldsort configuration")]
struct Cli {
    /// Read this file instead of searching the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the effective configuration
    Check,
}

fn load(path: Option<PathBuf>) -> Result<(SortConfig, ConfigSource)> {
    match path {
        Some(path) => {
            let config = SortConfig::load_from_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        None => SortConfig::load_from_env(),
    }
}

fn main() -> Result<()> {
    telemetry::init_tracing("info")?;

    let cli = Cli::parse();
    let (config, source) = load(cli.config)?;

    match cli.command {
        Command::Show => {
            println!("# source: {source}");
            print!("{}", config.to_toml()?);
        }
        Command::Check => {
            let options = config
                .to_options()
                .with_context(|| format!("configuration from {source} is invalid"))?;
            info!(
                %source,
                collation = options.collation.name(),
                pivot = ?options.pivot,
                nulls = ?options.nulls,
                "configuration ok"
            );
        }
    }
    Ok(())
}
