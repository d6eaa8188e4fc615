use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use vaultsecrets::{Configuration, DotenvSupplier, LazySecrets, TracingSink};

mod commands;
mod tracing_init;

use commands::Commands;

#[derive(Parser)]
#[command(name = "vaultsecrets")]
#[command(about = "Inspect the secrets injected for this service", long_about = None)]
#[command(version)]
struct Cli {
    /// Path of the injected secrets file (overrides VAULTSECRETS_SECRETS_PATH)
    #[arg(long, global = true)]
    secrets_path: Option<PathBuf>,

    /// Read the injected file instead of the developer override
    #[arg(long, global = true)]
    enable_vault: Option<bool>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_init::init().map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    let cli = Cli::parse();

    let mut config = Configuration::from_env();
    if let Some(path) = cli.secrets_path {
        config.secrets_path = path;
    }
    if let Some(enabled) = cli.enable_vault {
        config.vault_enabled = enabled;
    }

    let source = config.source_description();
    tracing::debug!(source = %source, "Using secrets source");

    let supplier = Arc::new(DotenvSupplier::from_config(&config));
    let secrets = LazySecrets::from_config(config, supplier, Arc::new(TracingSink));

    cli.command.execute(&secrets, &source, cli.format)
}
