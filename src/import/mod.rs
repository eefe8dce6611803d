//! Collection import: reconciles export rows into the catalog and a user's
//! collection.

mod entity_resolver;
mod error;
mod pipeline;
mod reconciler;
mod record;
mod release_resolver;
mod report;

pub use entity_resolver::{EntityResolver, NamedEntityKind, ResolvedEntity};
pub use error::{ImportError, RecordError, RecordStage};
pub use pipeline::{
    first_segment, split_artists, ImportPipeline, ImportSettings, UNKNOWN_FORMAT_NAME,
    UNKNOWN_LABEL_NAME,
};
pub use reconciler::{
    map_condition, parse_added_at, parse_rating, CollectionReconciler, MembershipRequest,
    Reconciliation,
};
pub use record::{parse_records, read_records, CollectionRecord};
pub use release_resolver::{ReleaseRequest, ReleaseResolution, ReleaseResolver};
pub use report::{ImportReport, RecordOutcome, RecordResult};

use crate::catalog_store::CatalogStore;
use crate::user::UserManager;
use std::path::Path;
use tracing::info;

/// Provisions the user, reads the whole input, then runs the pipeline.
///
/// Anything that goes wrong before the first record is processed is a
/// [`ImportError::Setup`]; per-record failures only show up in the report.
pub fn import_collection_file<P: AsRef<Path>>(
    catalog: &dyn CatalogStore,
    users: &UserManager,
    user_handle: &str,
    csv_path: P,
    settings: ImportSettings,
) -> Result<ImportReport, ImportError> {
    info!("Starting import for user: {}", user_handle);

    let owner = users
        .ensure_user_with_collection(user_handle)
        .map_err(ImportError::Setup)?;
    let records = read_records(csv_path).map_err(ImportError::Setup)?;

    let pipeline = ImportPipeline::new(catalog, users.store().as_collection_store(), settings);
    Ok(pipeline.run(owner.collection_id, &records))
}
