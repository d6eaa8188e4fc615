use serde::Serialize;
use vaultsecrets::LazySecrets;

use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    source: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    keys: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn execute(secrets: &LazySecrets, source: &str, format: OutputFormat) -> eyre::Result<()> {
    let result = secrets.keys();
    let report = CheckReport {
        source,
        ok: result.is_ok(),
        keys: result.as_ref().ok().map(Vec::len),
        error: result.as_ref().err().map(ToString::to_string),
    };

    match format {
        OutputFormat::Text => match &result {
            Ok(keys) => println!("ok: {} secrets from {source}", keys.len()),
            Err(e) => println!("failed to load secrets from {source}: {e}"),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
    }

    if let Err(e) = result {
        return Err(eyre::eyre!("secrets check failed: {e}"));
    }
    Ok(())
}
