use vaultsecrets::LazySecrets;

use crate::OutputFormat;

pub fn execute(secrets: &LazySecrets, name: &str, format: OutputFormat) -> eyre::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", secrets.get_str(name)?),
        OutputFormat::Json => println!("{}", serde_json::to_string(secrets.get(name)?)?),
    }

    Ok(())
}
