//! Find-or-create for simple named catalog entities.
//!
//! Artists and labels are matched on exact name equality, with no case or
//! whitespace normalization. When several rows share a name the earliest
//! one wins. Formats carry a unique name and go through a real upsert.

use crate::catalog_store::{Artist, CatalogStore, Format, Label};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedEntityKind {
    Artist,
    Label,
    Format,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEntity {
    Artist(Artist),
    Label(Label),
    Format(Format),
}

impl ResolvedEntity {
    pub fn id(&self) -> i64 {
        match self {
            ResolvedEntity::Artist(a) => a.id,
            ResolvedEntity::Label(l) => l.id,
            ResolvedEntity::Format(f) => f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResolvedEntity::Artist(a) => &a.name,
            ResolvedEntity::Label(l) => &l.name,
            ResolvedEntity::Format(f) => &f.name,
        }
    }
}

fn find_or_create<T>(
    existing: Vec<T>,
    create: impl FnOnce() -> Result<T>,
) -> Result<(T, bool)> {
    // Store lookups come back ordered by rowid
    match existing.into_iter().next() {
        Some(found) => Ok((found, false)),
        None => Ok((create()?, true)),
    }
}

pub struct EntityResolver<'a> {
    catalog: &'a dyn CatalogStore,
}

impl<'a> EntityResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogStore) -> Self {
        Self { catalog }
    }

    /// Resolves `name` to an entity of `kind`. `description` is only used
    /// when a Format has to be created.
    pub fn resolve_named(
        &self,
        kind: NamedEntityKind,
        name: &str,
        description: Option<&str>,
    ) -> Result<ResolvedEntity> {
        Ok(match kind {
            NamedEntityKind::Artist => ResolvedEntity::Artist(self.resolve_artist(name)?),
            NamedEntityKind::Label => ResolvedEntity::Label(self.resolve_label(name)?),
            NamedEntityKind::Format => {
                ResolvedEntity::Format(self.resolve_format(name, description)?)
            }
        })
    }

    pub fn resolve_artist(&self, name: &str) -> Result<Artist> {
        let (artist, created) = find_or_create(self.catalog.find_artists_by_name(name)?, || {
            self.catalog.create_artist(name)
        })?;
        if created {
            debug!("New artist {} ({})", artist.name, artist.id);
        }
        Ok(artist)
    }

    pub fn resolve_label(&self, name: &str) -> Result<Label> {
        let (label, created) = find_or_create(self.catalog.find_labels_by_name(name)?, || {
            self.catalog.create_label(name)
        })?;
        if created {
            debug!("New label {} ({})", label.name, label.id);
        }
        Ok(label)
    }

    /// An existing format is returned as is; its description is never
    /// replaced.
    pub fn resolve_format(&self, name: &str, description: Option<&str>) -> Result<Format> {
        self.catalog.upsert_format(name, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{SqliteCatalogStore, CATALOG_DB_FILE_NAME};
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteCatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteCatalogStore::new(temp_dir.path().join(CATALOG_DB_FILE_NAME)).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn artist_is_created_once() {
        let (store, _temp_dir) = create_tmp_store();
        let resolver = EntityResolver::new(&store);

        let first = resolver.resolve_artist("Photek").unwrap();
        let second = resolver.resolve_artist("Photek").unwrap();
        assert_eq!(first, second);
        assert_eq!(store.get_counts().unwrap().artists, 1);
    }

    #[test]
    fn names_are_not_normalized() {
        let (store, _temp_dir) = create_tmp_store();
        let resolver = EntityResolver::new(&store);

        let a = resolver.resolve_label("Warp").unwrap();
        let b = resolver.resolve_label("warp").unwrap();
        let c = resolver.resolve_label("Warp ").unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.get_counts().unwrap().labels, 3);
    }

    #[test]
    fn earliest_duplicate_wins() {
        let (store, _temp_dir) = create_tmp_store();
        let oldest = store.create_artist("Model 500").unwrap();
        store.create_artist("Model 500").unwrap();

        let resolver = EntityResolver::new(&store);
        assert_eq!(resolver.resolve_artist("Model 500").unwrap(), oldest);
    }

    #[test]
    fn format_description_is_set_on_creation_only() {
        let (store, _temp_dir) = create_tmp_store();
        let resolver = EntityResolver::new(&store);

        let created = resolver
            .resolve_named(NamedEntityKind::Format, "Vinyl", Some("Vinyl, LP"))
            .unwrap();
        let again = resolver
            .resolve_named(NamedEntityKind::Format, "Vinyl", Some("Vinyl, 7\""))
            .unwrap();

        assert_eq!(created.id(), again.id());
        match again {
            ResolvedEntity::Format(format) => {
                assert_eq!(format.description.as_deref(), Some("Vinyl, LP"))
            }
            other => panic!("expected a format, got {:?}", other),
        }
    }

    #[test]
    fn resolve_named_dispatches_on_kind() {
        let (store, _temp_dir) = create_tmp_store();
        let resolver = EntityResolver::new(&store);

        let artist = resolver
            .resolve_named(NamedEntityKind::Artist, "Shed", None)
            .unwrap();
        let label = resolver
            .resolve_named(NamedEntityKind::Label, "Ostgut Ton", None)
            .unwrap();
        assert!(matches!(artist, ResolvedEntity::Artist(_)));
        assert!(matches!(label, ResolvedEntity::Label(_)));
        assert_eq!(artist.name(), "Shed");
        assert_eq!(label.name(), "Ostgut Ton");
    }
}
