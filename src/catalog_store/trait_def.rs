//! CatalogStore trait definition.
//!
//! The import engine only talks to the catalog through this trait, so
//! resolvers can be handed any backend (the SQLite store in production,
//! a fresh temporary database per test).

use super::models::*;
use anyhow::Result;

pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Artists and Labels (non-unique names)
    // =========================================================================

    /// All artists whose name is exactly `name`, earliest created first.
    fn find_artists_by_name(&self, name: &str) -> Result<Vec<Artist>>;

    /// Inserts an artist carrying only a name.
    fn create_artist(&self, name: &str) -> Result<Artist>;

    /// All labels whose name is exactly `name`, earliest created first.
    fn find_labels_by_name(&self, name: &str) -> Result<Vec<Label>>;

    /// Inserts a label carrying only a name.
    fn create_label(&self, name: &str) -> Result<Label>;

    // =========================================================================
    // Unique-keyed entities
    // =========================================================================

    /// Inserts the format if its name is unknown. An existing format is
    /// returned untouched, its description is never overwritten.
    fn upsert_format(&self, name: &str, description: Option<&str>) -> Result<Format>;

    fn get_format(&self, id: FormatId) -> Result<Option<Format>>;

    fn upsert_genre(&self, name: &str) -> Result<Genre>;

    fn upsert_style(&self, name: &str) -> Result<Style>;

    /// Countries are keyed by their ISO code.
    fn upsert_country(&self, name: &str, code: &str) -> Result<Country>;

    // =========================================================================
    // Releases
    // =========================================================================

    /// First release (by rowid) with this exact title and catalog number.
    /// `None` only matches releases with no catalog number.
    fn find_release(&self, title: &str, catalog_number: Option<&str>) -> Result<Option<Release>>;

    /// Inserts a release together with its artist credits and tracks.
    fn create_release(&self, release: &NewRelease) -> Result<Release>;

    fn get_release(&self, id: ReleaseId) -> Result<Option<Release>>;

    fn get_label(&self, id: LabelId) -> Result<Option<Label>>;

    /// Artist credits ordered by position.
    fn get_release_artists(&self, id: ReleaseId) -> Result<Vec<ReleaseArtist>>;

    /// Tracks in insertion order.
    fn get_release_tracks(&self, id: ReleaseId) -> Result<Vec<Track>>;

    fn get_release_genres(&self, id: ReleaseId) -> Result<Vec<Genre>>;

    fn get_release_styles(&self, id: ReleaseId) -> Result<Vec<Style>>;

    fn add_release_genre(&self, release_id: ReleaseId, genre_id: i64) -> Result<()>;

    fn add_release_style(&self, release_id: ReleaseId, style_id: i64) -> Result<()>;

    // =========================================================================
    // Counts
    // =========================================================================

    fn get_counts(&self) -> Result<CatalogCounts>;
}
