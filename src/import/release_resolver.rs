use crate::catalog_store::{Artist, CatalogStore, Format, Label, NewRelease, Release};
use anyhow::Result;
use tracing::debug;

/// What the importer knows about a release from one input row.
#[derive(Debug, Clone)]
pub struct ReleaseRequest<'r> {
    pub title: &'r str,
    pub catalog_number: Option<&'r str>,
    pub release_date: Option<&'r str>,
    pub label: &'r Label,
    pub format: &'r Format,
    /// Credit order is kept as link position.
    pub artists: &'r [Artist],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseResolution {
    Existing(Release),
    Created(Release),
}

impl ReleaseResolution {
    pub fn release(&self) -> &Release {
        match self {
            ReleaseResolution::Existing(r) | ReleaseResolution::Created(r) => r,
        }
    }

    pub fn into_release(self) -> Release {
        match self {
            ReleaseResolution::Existing(r) | ReleaseResolution::Created(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, ReleaseResolution::Created(_))
    }
}

pub struct ReleaseResolver<'a> {
    catalog: &'a dyn CatalogStore,
}

impl<'a> ReleaseResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogStore) -> Self {
        Self { catalog }
    }

    /// Matches on exact (title, catalog number). A request without a catalog
    /// number only matches releases that have none either.
    ///
    /// A new release gets the requested label, format and artist credits.
    /// Genres and styles are left empty. An existing match is returned as
    /// stored, even if its label, format or credits differ from the request.
    pub fn resolve_or_create_release(&self, request: &ReleaseRequest) -> Result<ReleaseResolution> {
        if let Some(existing) = self
            .catalog
            .find_release(request.title, request.catalog_number)?
        {
            return Ok(ReleaseResolution::Existing(existing));
        }

        let release = self.catalog.create_release(&NewRelease {
            title: request.title.to_string(),
            catalog_number: request.catalog_number.map(str::to_string),
            release_date: request.release_date.map(str::to_string),
            notes: None,
            label_id: request.label.id,
            format_id: request.format.id,
            artist_ids: request.artists.iter().map(|a| a.id).collect(),
            tracks: vec![],
        })?;
        debug!(
            "New release {} [{}] ({})",
            release.title,
            release.catalog_number.as_deref().unwrap_or("no catalog number"),
            release.id
        );
        Ok(ReleaseResolution::Created(release))
    }
}
