//! wowcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use wowcal_client::error::ClientResult;
use wowcal_client::{Cli, ClientConfig, ExportSettings, export};
use wowcal_core::{MonthRef, init_tracing};
use wowcal_providers::armory::ArmoryProvider;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    let settings = ExportSettings::resolve(&cli, &config, MonthRef::current())?;

    init_tracing(settings.tracing_config())?;
    debug!(
        character = %settings.armory.character,
        realm = %settings.armory.realm,
        "Settings resolved"
    );

    let provider = ArmoryProvider::new(settings.armory.clone())?;
    let summary = export(&provider, &settings).await?;

    debug!(
        path = %summary.path.display(),
        events = summary.events,
        skipped = summary.skipped,
        "Done"
    );
    Ok(())
}
