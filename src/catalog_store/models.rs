//! Catalog models for the SQLite-backed store.
//!
//! Ids are SQLite rowids. Artists, labels and releases are not unique by
//! name; formats, genres, styles and countries are.

use serde::{Deserialize, Serialize};

pub type ArtistId = i64;
pub type LabelId = i64;
pub type FormatId = i64;
pub type ReleaseId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub real_name: Option<String>,
    pub profile: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub profile: Option<String>,
    pub contact_info: Option<String>,
}

/// Physical or digital carrier, unique by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub id: FormatId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub title: String,
    pub catalog_number: Option<String>,
    /// Free text as found in the source ("1997", "1997-05-00", ...).
    pub release_date: Option<String>,
    pub notes: Option<String>,
    pub label_id: LabelId,
    pub format_id: FormatId,
    pub country_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub release_id: ReleaseId,
    /// Side/position label, e.g. "A1".
    pub position: String,
    pub title: String,
    /// Free text "mm:ss".
    pub duration: Option<String>,
}

/// Data for a release that does not exist yet.
#[derive(Clone, Debug, Default)]
pub struct NewRelease {
    pub title: String,
    pub catalog_number: Option<String>,
    pub release_date: Option<String>,
    pub notes: Option<String>,
    pub label_id: LabelId,
    pub format_id: FormatId,
    /// Artist ids in credit order; stored with their index as position.
    pub artist_ids: Vec<ArtistId>,
    pub tracks: Vec<NewTrack>,
}

#[derive(Clone, Debug, Default)]
pub struct NewTrack {
    pub position: String,
    pub title: String,
    pub duration: Option<String>,
}

/// An artist credit on a release.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseArtist {
    pub artist: Artist,
    pub position: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// Row counts per catalog table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub artists: usize,
    pub labels: usize,
    pub formats: usize,
    pub releases: usize,
    pub tracks: usize,
}
