//! Export CLI command.

use anyhow::Result;
use catalyst_rater_core::AppConfig;
use catalyst_rater_data::EventStore;
use clap::Args;

/// Arguments for the export command.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output path for the combined JSON export
    #[arg(short, long, default_value = "export.json")]
    pub output: String,
}

pub fn run(config: &AppConfig, args: &ExportArgs) -> Result<()> {
    let store = EventStore::new(&config.data.dir)?;
    let records = store.export(&args.output)?;
    println!("Wrote {} records to {}", records.len(), args.output);
    Ok(())
}
