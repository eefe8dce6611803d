//! Catalog Seed Tool
//!
//! Upserts the reference formats, countries, genres and styles.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use vinyl_ledger::cli_common::{init_logging, CommonArgs};
use vinyl_ledger::seed::seed_reference_data;
use vinyl_ledger::{CatalogStore, SqliteCatalogStore};

#[derive(Parser, Debug)]
#[command(name = "seed-catalog")]
#[command(about = "Seed the catalog with reference data")]
struct CliArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &CliArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let store = SqliteCatalogStore::new(config.catalog_db_path())?;

    info!("Starting catalog seed...");
    let stats = seed_reference_data(&store)?;

    let counts = store.get_counts()?;
    info!("");
    info!("Seed Summary");
    info!("============");
    info!("Formats: {}", stats.formats);
    info!("Countries: {}", stats.countries);
    info!("Genres: {}", stats.genres);
    info!("Styles: {}", stats.styles);
    info!("Catalog now holds {} formats", counts.formats);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Seeding failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
