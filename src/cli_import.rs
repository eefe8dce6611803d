//! Collection Import Tool
//!
//! Reads a collection export CSV and records every row in the user's
//! collection, creating catalog entries as needed.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use vinyl_ledger::cli_common::{init_logging, parse_path, CommonArgs};
use vinyl_ledger::{
    import_collection_file, ImportError, ImportReport, SqliteCatalogStore, SqliteUserStore,
    UserManager,
};

#[derive(Parser, Debug)]
#[command(name = "import-collection")]
#[command(about = "Import a collection export CSV into a user's collection")]
struct CliArgs {
    /// Handle of the user owning the collection. Created if missing.
    #[arg(value_name = "USERNAME")]
    username: Option<String>,

    /// Path to the collection CSV export.
    #[arg(value_name = "CSV_PATH", value_parser = parse_path)]
    csv_path: Option<PathBuf>,

    /// Also write the per-record report as JSON to this path.
    #[arg(long, value_parser = parse_path)]
    report_json: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &CliArgs) -> Result<ImportReport, ImportError> {
    let (username, csv_path) = match (&args.username, &args.csv_path) {
        (Some(username), Some(csv_path)) => (username, csv_path),
        _ => {
            return Err(ImportError::Configuration(
                "Usage: import-collection <username> <csv-file-path>".to_string(),
            ))
        }
    };

    let config = args
        .common
        .resolve()
        .map_err(|e| ImportError::Configuration(format!("{:#}", e)))?;

    info!("Opening catalog at {:?}", config.catalog_db_path());
    let catalog = SqliteCatalogStore::new(config.catalog_db_path()).map_err(ImportError::Setup)?;
    let user_store = SqliteUserStore::new(config.user_db_path()).map_err(ImportError::Setup)?;
    let users = UserManager::new(Arc::new(user_store), config.placeholder_email_domain.clone());

    import_collection_file(&catalog, &users, username, csv_path, config.import)
}

fn main() -> ExitCode {
    init_logging();
    let args = CliArgs::parse();

    match run(&args) {
        Ok(report) => {
            info!(
                "Import process completed: {} imported, {} skipped, {} total",
                report.imported, report.skipped, report.total
            );
            if let Some(path) = &args.report_json {
                if let Err(e) = report.write_json(path) {
                    error!("{:#}", e);
                    return ExitCode::FAILURE;
                }
                info!("Report written to {:?}", path);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Import process failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
