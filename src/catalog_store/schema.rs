//! SQLite schema definitions for the record catalog database.
//!
//! Primary keys are integer rowids. Only formats, genres, styles and
//! countries carry a unique natural key; artists, labels and releases are
//! matched by lookup indices during import.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

// =============================================================================
// Core Tables
// =============================================================================

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("real_name", &SqlType::Text),
        sqlite_column!("profile", &SqlType::Text),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_artists_name", "name")],
    unique_constraints: &[],
};

const LABELS_TABLE: Table = Table {
    name: "labels",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("profile", &SqlType::Text),
        sqlite_column!("contact_info", &SqlType::Text),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_labels_name", "name")],
    unique_constraints: &[],
};

const FORMATS_TABLE: Table = Table {
    name: "formats",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text),
    ],
    indices: &[],
    unique_constraints: &[&["name"]],
};

const COUNTRIES_TABLE: Table = Table {
    name: "countries",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("code", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["code"]],
};

const RELEASES_TABLE: Table = Table {
    name: "releases",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("catalog_number", &SqlType::Text),
        sqlite_column!("release_date", &SqlType::Text), // free text, '1997', '1997-05-00'
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!(
            "label_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "labels",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!(
            "format_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "formats",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!(
            "country_rowid",
            &SqlType::Integer,
            foreign_key = Some(&ForeignKey {
                foreign_table: "countries",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::SetNull,
            })
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_releases_title", "title"),
        ("idx_releases_catalog_number", "catalog_number"),
    ],
    unique_constraints: &[],
};

const TRACKS_TABLE: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "release_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("position", &SqlType::Text, non_null = true), // 'A1', 'B2', '3'
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("duration", &SqlType::Text), // 'mm:ss'
    ],
    indices: &[("idx_tracks_release", "release_rowid")],
    unique_constraints: &[],
};

const GENRES_TABLE: Table = Table {
    name: "genres",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name"]],
};

const STYLES_TABLE: Table = Table {
    name: "styles",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["name"]],
};

// =============================================================================
// Junction Tables
// =============================================================================

/// Release <-> Artist credit, ordered by position
const RELEASE_ARTISTS_TABLE: Table = Table {
    name: "release_artists",
    columns: &[
        sqlite_column!(
            "release_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "artist_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_release_artists_release", "release_rowid"),
        ("idx_release_artists_artist", "artist_rowid"),
    ],
    unique_constraints: &[&["release_rowid", "position"]],
};

const RELEASE_GENRES_TABLE: Table = Table {
    name: "release_genres",
    columns: &[
        sqlite_column!(
            "release_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "genre_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "genres",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
    ],
    indices: &[("idx_release_genres_release", "release_rowid")],
    unique_constraints: &[&["release_rowid", "genre_rowid"]],
};

const RELEASE_STYLES_TABLE: Table = Table {
    name: "release_styles",
    columns: &[
        sqlite_column!(
            "release_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "style_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "styles",
                foreign_column: "rowid",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
    ],
    indices: &[("idx_release_styles_release", "release_rowid")],
    unique_constraints: &[&["release_rowid", "style_rowid"]],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        LABELS_TABLE,
        FORMATS_TABLE,
        COUNTRIES_TABLE,
        RELEASES_TABLE,
        TRACKS_TABLE,
        GENRES_TABLE,
        STYLES_TABLE,
        RELEASE_ARTISTS_TABLE,
        RELEASE_GENRES_TABLE,
        RELEASE_STYLES_TABLE,
    ],
    migration: None,
}];
