use vaultsecrets::LazySecrets;

use crate::OutputFormat;

pub fn execute(secrets: &LazySecrets, format: OutputFormat) -> eyre::Result<()> {
    let keys = secrets.keys()?;

    match format {
        OutputFormat::Text => {
            for key in keys {
                println!("{key}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&keys)?),
    }

    Ok(())
}
