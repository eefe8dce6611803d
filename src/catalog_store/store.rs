//! SQLite-backed catalog store implementation.
//!
//! A single connection guarded by a mutex; every call is a synchronous
//! request/response round trip. Multi-row inserts (a release with its
//! credits and tracks) run inside their own transaction.

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use super::validation::{validate_name, validate_new_release};
use crate::sqlite_persistence::open_versioned_db;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

pub const CATALOG_DB_FILE_NAME: &str = "catalog.db";

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, CATALOG_VERSIONED_SCHEMAS, "catalog")?;
        let store = SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        };

        let counts = store.get_counts()?;
        info!(
            "Opened catalog: {} artists, {} labels, {} formats, {} releases",
            counts.artists, counts.labels, counts.formats, counts.releases
        );
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Catalog connection mutex poisoned"))
    }

    // =========================================================================
    // Internal Helper Methods
    // =========================================================================

    fn parse_artist_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
            real_name: row.get(2)?,
            profile: row.get(3)?,
        })
    }

    fn parse_label_row(row: &rusqlite::Row) -> rusqlite::Result<Label> {
        Ok(Label {
            id: row.get(0)?,
            name: row.get(1)?,
            profile: row.get(2)?,
            contact_info: row.get(3)?,
        })
    }

    fn parse_release_row(row: &rusqlite::Row) -> rusqlite::Result<Release> {
        Ok(Release {
            id: row.get(0)?,
            title: row.get(1)?,
            catalog_number: row.get(2)?,
            release_date: row.get(3)?,
            notes: row.get(4)?,
            label_id: row.get(5)?,
            format_id: row.get(6)?,
            country_id: row.get(7)?,
        })
    }

    const RELEASE_COLUMNS: &'static str = "rowid, title, catalog_number, release_date, notes, label_rowid, format_rowid, country_rowid";

    fn count(conn: &Connection, table: &str) -> Result<usize> {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get(0)
        })?;
        Ok(count as usize)
    }

    fn insert_release_rows(conn: &Connection, release: &NewRelease) -> Result<ReleaseId> {
        conn.execute(
            "INSERT INTO releases (title, catalog_number, release_date, notes, label_rowid, format_rowid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &release.title,
                &release.catalog_number,
                &release.release_date,
                &release.notes,
                release.label_id,
                release.format_id,
            ],
        )
        .with_context(|| format!("Failed to insert release '{}'", release.title))?;
        let release_rowid = conn.last_insert_rowid();

        for (idx, artist_id) in release.artist_ids.iter().enumerate() {
            conn.execute(
                "INSERT INTO release_artists (release_rowid, artist_rowid, position) VALUES (?1, ?2, ?3)",
                params![release_rowid, artist_id, idx as i32],
            )
            .with_context(|| format!("Failed to credit artist {} on release", artist_id))?;
        }

        for track in &release.tracks {
            conn.execute(
                "INSERT INTO tracks (release_rowid, position, title, duration) VALUES (?1, ?2, ?3, ?4)",
                params![release_rowid, &track.position, &track.title, &track.duration],
            )?;
        }
        Ok(release_rowid)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn find_artists_by_name(&self, name: &str) -> Result<Vec<Artist>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT rowid, name, real_name, profile FROM artists WHERE name = ?1 ORDER BY rowid",
        )?;
        let artists = stmt
            .query_map(params![name], Self::parse_artist_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn create_artist(&self, name: &str) -> Result<Artist> {
        validate_name("Artist", name)?;
        let conn = self.conn()?;
        conn.execute("INSERT INTO artists (name) VALUES (?1)", params![name])
            .with_context(|| format!("Failed to create artist {}", name))?;
        let id = conn.last_insert_rowid();
        debug!("Created artist {} ({})", name, id);
        Ok(Artist {
            id,
            name: name.to_string(),
            real_name: None,
            profile: None,
        })
    }

    fn find_labels_by_name(&self, name: &str) -> Result<Vec<Label>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT rowid, name, profile, contact_info FROM labels WHERE name = ?1 ORDER BY rowid",
        )?;
        let labels = stmt
            .query_map(params![name], Self::parse_label_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(labels)
    }

    fn create_label(&self, name: &str) -> Result<Label> {
        validate_name("Label", name)?;
        let conn = self.conn()?;
        conn.execute("INSERT INTO labels (name) VALUES (?1)", params![name])
            .with_context(|| format!("Failed to create label {}", name))?;
        let id = conn.last_insert_rowid();
        debug!("Created label {} ({})", name, id);
        Ok(Label {
            id,
            name: name.to_string(),
            profile: None,
            contact_info: None,
        })
    }

    fn upsert_format(&self, name: &str, description: Option<&str>) -> Result<Format> {
        validate_name("Format", name)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO formats (name, description) VALUES (?1, ?2) ON CONFLICT(name) DO NOTHING",
            params![name, description],
        )
        .with_context(|| format!("Failed to upsert format {}", name))?;
        let format = conn.query_row(
            "SELECT rowid, name, description FROM formats WHERE name = ?1",
            params![name],
            |row| {
                Ok(Format {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            },
        )?;
        Ok(format)
    }

    fn get_format(&self, id: FormatId) -> Result<Option<Format>> {
        let conn = self.conn()?;
        let format = conn
            .query_row(
                "SELECT rowid, name, description FROM formats WHERE rowid = ?1",
                params![id],
                |row| {
                    Ok(Format {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(format)
    }

    fn upsert_genre(&self, name: &str) -> Result<Genre> {
        validate_name("Genre", name)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO genres (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        let id = conn.query_row(
            "SELECT rowid FROM genres WHERE name = ?1",
            params![name],
            |r| r.get(0),
        )?;
        Ok(Genre {
            id,
            name: name.to_string(),
        })
    }

    fn upsert_style(&self, name: &str) -> Result<Style> {
        validate_name("Style", name)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO styles (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        let id = conn.query_row(
            "SELECT rowid FROM styles WHERE name = ?1",
            params![name],
            |r| r.get(0),
        )?;
        Ok(Style {
            id,
            name: name.to_string(),
        })
    }

    fn upsert_country(&self, name: &str, code: &str) -> Result<Country> {
        validate_name("Country", code)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO countries (name, code) VALUES (?1, ?2) ON CONFLICT(code) DO NOTHING",
            params![name, code],
        )?;
        let country = conn.query_row(
            "SELECT rowid, name, code FROM countries WHERE code = ?1",
            params![code],
            |row| {
                Ok(Country {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    code: row.get(2)?,
                })
            },
        )?;
        Ok(country)
    }

    fn find_release(&self, title: &str, catalog_number: Option<&str>) -> Result<Option<Release>> {
        let conn = self.conn()?;
        // `IS` makes a NULL catalog number match only NULL
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM releases WHERE title = ?1 AND catalog_number IS ?2 ORDER BY rowid LIMIT 1",
            Self::RELEASE_COLUMNS
        ))?;
        let release = stmt
            .query_row(params![title, catalog_number], Self::parse_release_row)
            .optional()?;
        Ok(release)
    }

    fn create_release(&self, release: &NewRelease) -> Result<Release> {
        validate_new_release(release)?;
        let conn = self.conn()?;
        conn.execute("BEGIN IMMEDIATE", [])?;

        match Self::insert_release_rows(&conn, release) {
            Ok(release_rowid) => {
                conn.execute("COMMIT", [])?;
                debug!("Created release {} ({})", release.title, release_rowid);
                Ok(Release {
                    id: release_rowid,
                    title: release.title.clone(),
                    catalog_number: release.catalog_number.clone(),
                    release_date: release.release_date.clone(),
                    notes: release.notes.clone(),
                    label_id: release.label_id,
                    format_id: release.format_id,
                    country_id: None,
                })
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    fn get_release(&self, id: ReleaseId) -> Result<Option<Release>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM releases WHERE rowid = ?1",
            Self::RELEASE_COLUMNS
        ))?;
        let release = stmt
            .query_row(params![id], Self::parse_release_row)
            .optional()?;
        Ok(release)
    }

    fn get_label(&self, id: LabelId) -> Result<Option<Label>> {
        let conn = self.conn()?;
        let label = conn
            .query_row(
                "SELECT rowid, name, profile, contact_info FROM labels WHERE rowid = ?1",
                params![id],
                Self::parse_label_row,
            )
            .optional()?;
        Ok(label)
    }

    fn get_release_artists(&self, id: ReleaseId) -> Result<Vec<ReleaseArtist>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT a.rowid, a.name, a.real_name, a.profile, ra.position
             FROM release_artists ra
             INNER JOIN artists a ON a.rowid = ra.artist_rowid
             WHERE ra.release_rowid = ?1
             ORDER BY ra.position",
        )?;
        let artists = stmt
            .query_map(params![id], |row| {
                Ok(ReleaseArtist {
                    artist: Self::parse_artist_row(row)?,
                    position: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn get_release_tracks(&self, id: ReleaseId) -> Result<Vec<Track>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT rowid, release_rowid, position, title, duration
             FROM tracks WHERE release_rowid = ?1 ORDER BY rowid",
        )?;
        let tracks = stmt
            .query_map(params![id], |row| {
                Ok(Track {
                    id: row.get(0)?,
                    release_id: row.get(1)?,
                    position: row.get(2)?,
                    title: row.get(3)?,
                    duration: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }

    fn get_release_genres(&self, id: ReleaseId) -> Result<Vec<Genre>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT g.rowid, g.name FROM release_genres rg
             INNER JOIN genres g ON g.rowid = rg.genre_rowid
             WHERE rg.release_rowid = ?1 ORDER BY g.name",
        )?;
        let genres = stmt
            .query_map(params![id], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn get_release_styles(&self, id: ReleaseId) -> Result<Vec<Style>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT s.rowid, s.name FROM release_styles rs
             INNER JOIN styles s ON s.rowid = rs.style_rowid
             WHERE rs.release_rowid = ?1 ORDER BY s.name",
        )?;
        let styles = stmt
            .query_map(params![id], |row| {
                Ok(Style {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(styles)
    }

    fn add_release_genre(&self, release_id: ReleaseId, genre_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO release_genres (release_rowid, genre_rowid) VALUES (?1, ?2)",
            params![release_id, genre_id],
        )?;
        Ok(())
    }

    fn add_release_style(&self, release_id: ReleaseId, style_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO release_styles (release_rowid, style_rowid) VALUES (?1, ?2)",
            params![release_id, style_id],
        )?;
        Ok(())
    }

    fn get_counts(&self) -> Result<CatalogCounts> {
        let conn = self.conn()?;
        Ok(CatalogCounts {
            artists: Self::count(&conn, "artists")?,
            labels: Self::count(&conn, "labels")?,
            formats: Self::count(&conn, "formats")?,
            releases: Self::count(&conn, "releases")?,
            tracks: Self::count(&conn, "tracks")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteCatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteCatalogStore::new(temp_dir.path().join(CATALOG_DB_FILE_NAME)).unwrap();
        (store, temp_dir)
    }

    fn create_release_fixture(store: &SqliteCatalogStore, catalog_number: Option<&str>) -> Release {
        let artist = store.create_artist("Aphex Twin").unwrap();
        let label = store.create_label("Warp Records").unwrap();
        let format = store.upsert_format("Vinyl", None).unwrap();
        store
            .create_release(&NewRelease {
                title: "Drukqs".to_string(),
                catalog_number: catalog_number.map(str::to_string),
                label_id: label.id,
                format_id: format.id,
                artist_ids: vec![artist.id],
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_duplicate_artist_names_are_allowed_and_ordered() {
        let (store, _temp_dir) = create_tmp_store();
        let first = store.create_artist("Burial").unwrap();
        let second = store.create_artist("Burial").unwrap();
        assert_ne!(first.id, second.id);

        let found = store.find_artists_by_name("Burial").unwrap();
        assert_eq!(found, vec![first, second]);
        assert!(store.find_artists_by_name("burial").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_format_keeps_original_description() {
        let (store, _temp_dir) = create_tmp_store();
        let first = store.upsert_format("Vinyl", Some("Vinyl, LP, Album")).unwrap();
        let second = store.upsert_format("Vinyl", Some("Vinyl, 12\"")).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.description.as_deref(), Some("Vinyl, LP, Album"));
        assert_eq!(store.get_counts().unwrap().formats, 1);
    }

    #[test]
    fn test_find_release_treats_missing_catalog_number_as_distinct() {
        let (store, _temp_dir) = create_tmp_store();
        let with_number = create_release_fixture(&store, Some("WARP92"));

        assert_eq!(
            store.find_release("Drukqs", Some("WARP92")).unwrap(),
            Some(with_number)
        );
        assert_eq!(store.find_release("Drukqs", None).unwrap(), None);
        assert_eq!(store.find_release("Drukqs", Some("WARP93")).unwrap(), None);
    }

    #[test]
    fn test_find_release_without_catalog_number() {
        let (store, _temp_dir) = create_tmp_store();
        let release = create_release_fixture(&store, None);
        assert_eq!(store.find_release("Drukqs", None).unwrap(), Some(release));
        assert_eq!(store.find_release("Drukqs", Some("WARP92")).unwrap(), None);
    }

    #[test]
    fn test_create_release_with_credits_and_tracks() {
        let (store, _temp_dir) = create_tmp_store();
        let a = store.create_artist("Moodymann").unwrap();
        let b = store.create_artist("Theo Parrish").unwrap();
        let label = store.create_label("KDJ").unwrap();
        let format = store.upsert_format("Vinyl", None).unwrap();

        let release = store
            .create_release(&NewRelease {
                title: "Split".to_string(),
                label_id: label.id,
                format_id: format.id,
                artist_ids: vec![b.id, a.id],
                tracks: vec![
                    NewTrack {
                        position: "B1".to_string(),
                        title: "Second".to_string(),
                        duration: Some("6:01".to_string()),
                    },
                    NewTrack {
                        position: "A1".to_string(),
                        title: "First".to_string(),
                        duration: None,
                    },
                ],
                ..Default::default()
            })
            .unwrap();

        let credits = store.get_release_artists(release.id).unwrap();
        assert_eq!(credits.len(), 2);
        assert_eq!(credits[0].artist.name, "Theo Parrish");
        assert_eq!(credits[0].position, 0);
        assert_eq!(credits[1].artist.name, "Moodymann");
        assert_eq!(credits[1].position, 1);

        let tracks = store.get_release_tracks(release.id).unwrap();
        let positions: Vec<&str> = tracks.iter().map(|t| t.position.as_str()).collect();
        assert_eq!(positions, vec!["B1", "A1"]);

        assert!(store.get_release_genres(release.id).unwrap().is_empty());
        assert!(store.get_release_styles(release.id).unwrap().is_empty());
    }

    #[test]
    fn test_failed_release_insert_rolls_back() {
        let (store, _temp_dir) = create_tmp_store();
        let label = store.create_label("Nowhere").unwrap();
        let format = store.upsert_format("CD", None).unwrap();

        let result = store.create_release(&NewRelease {
            title: "Ghost".to_string(),
            label_id: label.id,
            format_id: format.id,
            artist_ids: vec![9999],
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(store.get_counts().unwrap().releases, 0);
    }

    #[test]
    fn test_genre_and_style_links() {
        let (store, _temp_dir) = create_tmp_store();
        let release = create_release_fixture(&store, Some("WARP92"));
        let genre = store.upsert_genre("Electronic").unwrap();
        let style = store.upsert_style("IDM").unwrap();

        store.add_release_genre(release.id, genre.id).unwrap();
        store.add_release_genre(release.id, genre.id).unwrap();
        store.add_release_style(release.id, style.id).unwrap();

        assert_eq!(store.get_release_genres(release.id).unwrap(), vec![genre]);
        assert_eq!(store.get_release_styles(release.id).unwrap(), vec![style]);
    }

    #[test]
    fn test_reopen_existing_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join(CATALOG_DB_FILE_NAME);
        {
            let store = SqliteCatalogStore::new(&db_path).unwrap();
            store.create_artist("Basic Channel").unwrap();
        }
        let store = SqliteCatalogStore::new(&db_path).unwrap();
        assert_eq!(store.get_counts().unwrap().artists, 1);
    }
}
