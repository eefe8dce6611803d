//! Vinyl Ledger Library
//!
//! Record catalog and per-user collection ledger, plus the engine that
//! imports collection exports into them.

pub mod catalog_store;
pub mod cli_common;
pub mod config;
pub mod import;
pub mod seed;
pub mod sqlite_persistence;
pub mod user;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use import::{import_collection_file, ImportError, ImportPipeline, ImportReport};
pub use user::{CollectionStore, SqliteUserStore, UserManager, UserStore};
