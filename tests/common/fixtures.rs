//! Test fixtures: temporary databases and collection export files

use super::constants::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use vinyl_ledger::import::ImportSettings;
use vinyl_ledger::user::ImportOwner;
use vinyl_ledger::{
    import_collection_file, ImportReport, SqliteCatalogStore, SqliteUserStore, UserManager,
};

/// One data row of a collection export. Columns the importer ignores are
/// filled with plausible values.
#[derive(Debug, Clone, Default)]
pub struct CsvRow {
    pub catalog_number: String,
    pub artist: String,
    pub title: String,
    pub label: String,
    pub format: String,
    pub rating: String,
    pub released: String,
    pub date_added: String,
    pub media_condition: String,
    pub notes: String,
}

#[allow(dead_code)]
impl CsvRow {
    pub fn rating(mut self, rating: &str) -> Self {
        self.rating = rating.to_string();
        self
    }

    pub fn condition(mut self, condition: &str) -> Self {
        self.media_condition = condition.to_string();
        self
    }

    pub fn date_added(mut self, date_added: &str) -> Self {
        self.date_added = date_added.to_string();
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    fn fields(&self) -> [&str; 13] {
        [
            &self.catalog_number,
            &self.artist,
            &self.title,
            &self.label,
            &self.format,
            &self.rating,
            &self.released,
            "0",
            "Uncategorized",
            &self.date_added,
            &self.media_condition,
            "",
            &self.notes,
        ]
    }
}

pub fn csv_row(
    catalog_number: &str,
    artist: &str,
    title: &str,
    label: &str,
    format: &str,
    released: &str,
    media_condition: &str,
) -> CsvRow {
    CsvRow {
        catalog_number: catalog_number.to_string(),
        artist: artist.to_string(),
        title: title.to_string(),
        label: label.to_string(),
        format: format.to_string(),
        released: released.to_string(),
        media_condition: media_condition.to_string(),
        ..Default::default()
    }
}

/// Catalog and user databases in a temporary directory.
///
/// The directory is deleted when this is dropped.
#[allow(dead_code)]
pub struct TestEnv {
    pub dir: TempDir,
    pub catalog: SqliteCatalogStore,
    pub users: UserManager,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = SqliteCatalogStore::new(dir.path().join("catalog.db"))
            .expect("Failed to open catalog store");
        let user_store =
            SqliteUserStore::new(dir.path().join("user.db")).expect("Failed to open user store");
        let users = UserManager::new(Arc::new(user_store), "example.com".to_string());
        Self {
            dir,
            catalog,
            users,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes an export file with the full header and the given rows.
    pub fn write_csv(&self, file_name: &str, rows: &[CsvRow]) -> PathBuf {
        let path = self.dir.path().join(file_name);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .expect("Failed to create csv file");
        writer
            .write_record(EXPORT_HEADER.split(','))
            .expect("Failed to write header");
        for row in rows {
            writer
                .write_record(row.fields())
                .expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush csv file");
        path
    }

    pub fn import(&self, user_handle: &str, csv_path: &Path) -> ImportReport {
        import_collection_file(
            &self.catalog,
            &self.users,
            user_handle,
            csv_path,
            ImportSettings::default(),
        )
        .expect("Import failed")
    }

    pub fn owner(&self, user_handle: &str) -> ImportOwner {
        self.users
            .find_owner(user_handle)
            .expect("Failed to look up owner")
            .expect("User has no collection")
    }
}
