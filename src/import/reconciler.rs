//! Idempotent ownership records.
//!
//! A (collection, release) pair is recorded once. Meeting the same pair
//! again is a skip: nothing about the stored item changes.

use crate::catalog_store::ReleaseId;
use crate::user::{
    is_valid_rating, CollectionId, CollectionItem, CollectionStore, ItemCondition,
    NewCollectionItem,
};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

const ADDED_AT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A rating is kept only if it is a whole number between 1 and 5.
pub fn parse_rating(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|r| is_valid_rating(*r))
        .map(|r| r as u8)
}

pub fn map_condition(raw: &str) -> ItemCondition {
    ItemCondition::from_grading_label(raw)
}

/// Reads an export timestamp as UTC unix seconds. Accepts
/// `YYYY-MM-DD HH:MM:SS`, RFC 3339 and a bare date.
pub fn parse_added_at(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    for format in ADDED_AT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Raw ownership fields of one input row.
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipRequest<'r> {
    pub raw_condition: &'r str,
    pub raw_rating: &'r str,
    pub notes: Option<&'r str>,
    pub raw_added_at: &'r str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub created: bool,
    pub item: CollectionItem,
}

pub struct CollectionReconciler<'a> {
    collections: &'a dyn CollectionStore,
}

impl<'a> CollectionReconciler<'a> {
    pub fn new(collections: &'a dyn CollectionStore) -> Self {
        Self { collections }
    }

    pub fn reconcile(
        &self,
        collection_id: CollectionId,
        release_id: ReleaseId,
        request: &MembershipRequest,
    ) -> Result<Reconciliation> {
        if let Some(existing) = self
            .collections
            .find_collection_item(collection_id, release_id)?
        {
            return Ok(Reconciliation {
                created: false,
                item: existing,
            });
        }

        let added_at = parse_added_at(request.raw_added_at);
        if added_at.is_none() && !request.raw_added_at.trim().is_empty() {
            warn!(
                "Unreadable date added {:?} for release {}, storing none",
                request.raw_added_at, release_id
            );
        }

        let item = self.collections.create_collection_item(
            collection_id,
            &NewCollectionItem {
                release_id,
                condition: map_condition(request.raw_condition),
                rating: parse_rating(request.raw_rating),
                notes: request.notes.map(str::to_string),
                added_at,
            },
        )?;
        Ok(Reconciliation {
            created: true,
            item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{SqliteUserStore, UserStore, USER_DB_FILE_NAME};
    use tempfile::TempDir;

    fn create_collection() -> (SqliteUserStore, CollectionId, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteUserStore::new(temp_dir.path().join(USER_DB_FILE_NAME)).unwrap();
        let user_id = store.create_user("digger", "digger@example.com").unwrap();
        let collection_id = store.create_collection(user_id).unwrap();
        (store, collection_id, temp_dir)
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(parse_rating("1"), Some(1));
        assert_eq!(parse_rating("5"), Some(5));
        assert_eq!(parse_rating(" 3 "), Some(3));
        assert_eq!(parse_rating("0"), None);
        assert_eq!(parse_rating("6"), None);
        assert_eq!(parse_rating("-1"), None);
        assert_eq!(parse_rating("4.5"), None);
        assert_eq!(parse_rating("five"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("99999999999999999999"), None);
    }

    #[test]
    fn added_at_formats() {
        assert_eq!(parse_added_at("2021-03-04 10:11:12"), Some(1_614_852_672));
        assert_eq!(parse_added_at("2021-03-04T10:11:12Z"), Some(1_614_852_672));
        assert_eq!(
            parse_added_at("2021-03-04T11:11:12+01:00"),
            Some(1_614_852_672)
        );
        assert_eq!(parse_added_at("2021-03-04"), Some(1_614_816_000));
        assert_eq!(parse_added_at("yesterday"), None);
        assert_eq!(parse_added_at(""), None);
    }

    #[test]
    fn first_encounter_creates_item() {
        let (store, collection_id, _temp_dir) = create_collection();
        let reconciler = CollectionReconciler::new(&store);

        let result = reconciler
            .reconcile(
                collection_id,
                10,
                &MembershipRequest {
                    raw_condition: "Very Good Plus (VG+)",
                    raw_rating: "4",
                    notes: Some("Signed"),
                    raw_added_at: "2022-01-02 03:04:05",
                },
            )
            .unwrap();

        assert!(result.created);
        assert_eq!(result.item.condition, ItemCondition::VeryGoodPlus);
        assert_eq!(result.item.rating, Some(4));
        assert_eq!(result.item.notes.as_deref(), Some("Signed"));
        assert!(result.item.added_at.is_some());
    }

    #[test]
    fn second_encounter_is_a_skip_without_update() {
        let (store, collection_id, _temp_dir) = create_collection();
        let reconciler = CollectionReconciler::new(&store);

        let first = reconciler
            .reconcile(
                collection_id,
                10,
                &MembershipRequest {
                    raw_condition: "Mint (M)",
                    raw_rating: "5",
                    ..Default::default()
                },
            )
            .unwrap();
        let second = reconciler
            .reconcile(
                collection_id,
                10,
                &MembershipRequest {
                    raw_condition: "Poor (P)",
                    raw_rating: "1",
                    notes: Some("Warped"),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!second.created);
        assert_eq!(second.item, first.item);
        assert_eq!(store.count_collection_items(collection_id).unwrap(), 1);
    }

    #[test]
    fn unknown_condition_and_bad_rating_are_absorbed() {
        let (store, collection_id, _temp_dir) = create_collection();
        let reconciler = CollectionReconciler::new(&store);

        let result = reconciler
            .reconcile(
                collection_id,
                11,
                &MembershipRequest {
                    raw_condition: "Sealed",
                    raw_rating: "6",
                    notes: None,
                    raw_added_at: "not a date",
                },
            )
            .unwrap();
        assert!(result.created);
        assert_eq!(result.item.condition, ItemCondition::Good);
        assert_eq!(result.item.rating, None);
        assert_eq!(result.item.added_at, None);
    }
}
