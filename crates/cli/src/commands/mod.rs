use clap::Subcommand;
use vaultsecrets::LazySecrets;

use crate::OutputFormat;

pub mod check;
pub mod get;
pub mod keys;

#[derive(Subcommand)]
pub enum Commands {
    /// List the names of all resolved secrets
    Keys,

    /// Print the value of one secret
    Get {
        /// Secret name
        name: String,
    },

    /// Resolve secrets and report the source and key count
    Check,
}

impl Commands {
    pub fn execute(
        self,
        secrets: &LazySecrets,
        source: &str,
        format: OutputFormat,
    ) -> eyre::Result<()> {
        match self {
            Commands::Keys => keys::execute(secrets, format),
            Commands::Get { name } => get::execute(secrets, &name, format),
            Commands::Check => check::execute(secrets, source, format),
        }
    }
}
