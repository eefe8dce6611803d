//! Per-record import flow.
//!
//! Each record runs parse, resolve artists, resolve label, resolve format,
//! resolve release and reconcile membership, in that order. Records are
//! processed one at a time: entity resolution is look-up-then-create with
//! no compare-and-create in the store, so two records introducing the same
//! new name must never race. A record that fails at any stage is logged,
//! counted as skipped, and the run moves on.
//!
//! Store calls are not wrapped in a per-record transaction. A crash mid
//! record can leave new artists or labels behind; re-running converges
//! because every step finds before it creates.

use super::entity_resolver::EntityResolver;
use super::error::{RecordError, RecordStage};
use super::reconciler::{CollectionReconciler, MembershipRequest};
use super::record::CollectionRecord;
use super::release_resolver::{ReleaseRequest, ReleaseResolver};
use super::report::{ImportReport, RecordOutcome, RecordResult};
use crate::catalog_store::{Artist, CatalogStore};
use crate::user::{CollectionId, CollectionStore};
use anyhow::{anyhow, Result};
use tracing::{error, info};

pub const UNKNOWN_LABEL_NAME: &str = "Unknown Label";
pub const UNKNOWN_FORMAT_NAME: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Used when a record's label field is empty.
    pub unknown_label_name: String,
    /// Used when a record's format field is empty.
    pub unknown_format_name: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            unknown_label_name: UNKNOWN_LABEL_NAME.to_string(),
            unknown_format_name: UNKNOWN_FORMAT_NAME.to_string(),
        }
    }
}

/// Splits a credit like "A, B & C" into its trimmed, non-empty names.
pub fn split_artists(field: &str) -> Vec<&str> {
    field
        .split([',', '&'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// The first comma-separated segment, trimmed. Later segments are dropped.
pub fn first_segment(field: &str) -> &str {
    field.split(',').next().unwrap_or_default().trim()
}

enum RecordFlow {
    Imported,
    AlreadyInCollection,
}

pub struct ImportPipeline<'a> {
    entities: EntityResolver<'a>,
    releases: ReleaseResolver<'a>,
    reconciler: CollectionReconciler<'a>,
    settings: ImportSettings,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(
        catalog: &'a dyn CatalogStore,
        collections: &'a dyn CollectionStore,
        settings: ImportSettings,
    ) -> Self {
        Self {
            entities: EntityResolver::new(catalog),
            releases: ReleaseResolver::new(catalog),
            reconciler: CollectionReconciler::new(collections),
            settings,
        }
    }

    pub fn run(&self, collection_id: CollectionId, records: &[CollectionRecord]) -> ImportReport {
        info!("Found {} records to import", records.len());

        let mut report = ImportReport::default();
        for (idx, record) in records.iter().enumerate() {
            let result = match self.process_record(collection_id, record) {
                Ok(RecordFlow::Imported) => {
                    info!("Imported: {} - {}", record.artist, record.title);
                    RecordResult::Imported
                }
                Ok(RecordFlow::AlreadyInCollection) => {
                    info!("Already in collection: {} - {}", record.artist, record.title);
                    RecordResult::AlreadyInCollection
                }
                Err(err) => {
                    error!(
                        "Failed to import \"{}\" at {}: {:#}",
                        err.title, err.stage, err.source
                    );
                    RecordResult::Failed {
                        stage: err.stage,
                        reason: format!("{:#}", err.source),
                    }
                }
            };
            report.record(RecordOutcome {
                row: idx + 1,
                title: record.title.clone(),
                artist: record.artist.clone(),
                result,
            });
        }

        info!("Import complete!");
        info!("Successfully imported: {} records", report.imported);
        info!("Skipped: {} records", report.skipped);
        report
    }

    fn process_record(
        &self,
        collection_id: CollectionId,
        record: &CollectionRecord,
    ) -> Result<RecordFlow, RecordError> {
        let title = record.title.as_str();
        let at = |stage: RecordStage| move |err: anyhow::Error| RecordError::new(stage, title, err);

        // Parse
        if title.is_empty() {
            return Err(at(RecordStage::Parse)(anyhow!("Record has no title")));
        }
        let artist_names = split_artists(&record.artist);
        if artist_names.is_empty() {
            return Err(at(RecordStage::Parse)(anyhow!("Record has no artist")));
        }

        let artists = artist_names
            .iter()
            .map(|name| self.entities.resolve_artist(name))
            .collect::<Result<Vec<Artist>>>()
            .map_err(at(RecordStage::ResolveArtists))?;

        let label_name = match first_segment(&record.label) {
            "" => self.settings.unknown_label_name.as_str(),
            name => name,
        };
        let label = self
            .entities
            .resolve_label(label_name)
            .map_err(at(RecordStage::ResolveLabel))?;

        let format_name = match first_segment(&record.format) {
            "" => self.settings.unknown_format_name.as_str(),
            name => name,
        };
        let format_description = if record.format.is_empty() {
            None
        } else {
            Some(record.format.as_str())
        };
        let format = self
            .entities
            .resolve_format(format_name, format_description)
            .map_err(at(RecordStage::ResolveFormat))?;

        let release = self
            .releases
            .resolve_or_create_release(&ReleaseRequest {
                title,
                catalog_number: record.catalog_number(),
                release_date: record.release_date(),
                label: &label,
                format: &format,
                artists: &artists,
            })
            .map_err(at(RecordStage::ResolveRelease))?
            .into_release();

        let reconciliation = self
            .reconciler
            .reconcile(
                collection_id,
                release.id,
                &MembershipRequest {
                    raw_condition: &record.media_condition,
                    raw_rating: &record.rating,
                    notes: record.notes(),
                    raw_added_at: &record.date_added,
                },
            )
            .map_err(at(RecordStage::ReconcileMembership))?;

        Ok(if reconciliation.created {
            RecordFlow::Imported
        } else {
            RecordFlow::AlreadyInCollection
        })
    }
}
