//! Record catalog: artists, labels, formats and releases.

mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use models::*;
pub use store::{SqliteCatalogStore, CATALOG_DB_FILE_NAME};
pub use trait_def::CatalogStore;
pub use validation::{validate_name, validate_new_release, ValidationError, ValidationResult};
