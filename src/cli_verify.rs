//! Collection Verification Tool
//!
//! Read-only overview of a user's collection: item count, a few sample
//! entries, and condition and rating distributions.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use vinyl_ledger::cli_common::{init_logging, CommonArgs};
use vinyl_ledger::{SqliteCatalogStore, SqliteUserStore, UserManager};

#[derive(Parser, Debug)]
#[command(name = "verify-collection")]
#[command(about = "Summarize a user's collection")]
struct CliArgs {
    /// Handle of the user to inspect.
    #[arg(value_name = "USERNAME")]
    username: String,

    /// How many entries to print.
    #[arg(long, default_value_t = 5)]
    samples: usize,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &CliArgs) -> Result<()> {
    let config = args.common.resolve()?;
    let catalog = SqliteCatalogStore::new(config.catalog_db_path())?;
    let user_store = SqliteUserStore::new(config.user_db_path())?;
    let users = UserManager::new(Arc::new(user_store), config.placeholder_email_domain);

    let Some(owner) = users.find_owner(&args.username)? else {
        info!("User {} not found or has no collection", args.username);
        return Ok(());
    };

    let entries = users.collection_entries(owner.collection_id, &catalog)?;
    info!("");
    info!("Collection for user: {}", args.username);
    info!("Total items: {}", entries.len());

    info!("");
    info!("Sample items:");
    for (idx, entry) in entries.iter().take(args.samples).enumerate() {
        info!("{}. {} - {}", idx + 1, entry.artist_credit(), entry.title);
        info!("   Label: {}", entry.label.as_deref().unwrap_or("-"));
        info!("   Format: {}", entry.format.as_deref().unwrap_or("-"));
        info!("   Condition: {}", entry.item.condition.as_db_str());
        if let Some(rating) = entry.item.rating {
            info!("   Rating: {}/5", rating);
        }
    }

    let summary = users.collection_summary(owner.collection_id)?;
    info!("");
    info!("Condition distribution:");
    for (condition, count) in &summary.by_condition {
        info!("{}: {}", condition.as_db_str(), count);
    }
    info!("");
    info!("Rating distribution:");
    for (rating, count) in &summary.by_rating {
        info!("{} stars: {}", rating, count);
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Verification failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
