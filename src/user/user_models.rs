//! User and collection data models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog_store::ReleaseId;

pub type CollectionId = i64;
pub type CollectionItemId = i64;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: usize,
    pub handle: String,
    pub email: String,
}

/// Media condition on the standard Goldmine grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCondition {
    Mint,
    NearMint,
    VeryGoodPlus,
    VeryGood,
    GoodPlus,
    Good,
    Fair,
    Poor,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 8] = [
        ItemCondition::Mint,
        ItemCondition::NearMint,
        ItemCondition::VeryGoodPlus,
        ItemCondition::VeryGood,
        ItemCondition::GoodPlus,
        ItemCondition::Good,
        ItemCondition::Fair,
        ItemCondition::Poor,
    ];

    pub fn as_db_str(&self) -> &'static str {
        match self {
            ItemCondition::Mint => "MINT",
            ItemCondition::NearMint => "NEAR_MINT",
            ItemCondition::VeryGoodPlus => "VERY_GOOD_PLUS",
            ItemCondition::VeryGood => "VERY_GOOD",
            ItemCondition::GoodPlus => "GOOD_PLUS",
            ItemCondition::Good => "GOOD",
            ItemCondition::Fair => "FAIR",
            ItemCondition::Poor => "POOR",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_db_str() == value)
    }

    /// The label used by collection exports, e.g. "Very Good Plus (VG+)".
    pub fn grading_label(&self) -> &'static str {
        match self {
            ItemCondition::Mint => "Mint (M)",
            ItemCondition::NearMint => "Near Mint (NM or M-)",
            ItemCondition::VeryGoodPlus => "Very Good Plus (VG+)",
            ItemCondition::VeryGood => "Very Good (VG)",
            ItemCondition::GoodPlus => "Good Plus (G+)",
            ItemCondition::Good => "Good (G)",
            ItemCondition::Fair => "Fair (F)",
            ItemCondition::Poor => "Poor (P)",
        }
    }

    /// Maps an exported grading label onto a condition. Matching is exact;
    /// anything unrecognized (including an empty string) is `Good`.
    pub fn from_grading_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.grading_label() == label)
            .unwrap_or(ItemCondition::Good)
    }
}

pub fn is_valid_rating(rating: i64) -> bool {
    (MIN_RATING as i64..=MAX_RATING as i64).contains(&rating)
}

/// One owned release inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionItem {
    pub id: CollectionItemId,
    pub collection_id: CollectionId,
    pub release_id: ReleaseId,
    pub condition: ItemCondition,
    pub rating: Option<u8>,
    pub notes: Option<String>,
    /// Unix seconds. Absent when the source date could not be read.
    pub added_at: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewCollectionItem {
    pub release_id: ReleaseId,
    pub condition: ItemCondition,
    pub rating: Option<u8>,
    pub notes: Option<String>,
    pub added_at: Option<i64>,
}

/// Partial update of an item; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CollectionItemUpdate {
    pub condition: Option<ItemCondition>,
    pub rating: Option<u8>,
    pub notes: Option<String>,
}

/// A collection item joined with the catalog data needed to display it.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionEntry {
    pub item: CollectionItem,
    pub title: String,
    pub catalog_number: Option<String>,
    pub artists: Vec<String>,
    pub label: Option<String>,
    pub format: Option<String>,
}

impl CollectionEntry {
    pub fn artist_credit(&self) -> String {
        self.artists.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub total_items: usize,
    pub by_condition: BTreeMap<ItemCondition, usize>,
    /// Only rated items are counted.
    pub by_rating: BTreeMap<u8, usize>,
}

impl CollectionSummary {
    pub fn from_items<'a, I: IntoIterator<Item = &'a CollectionItem>>(items: I) -> Self {
        let mut summary = CollectionSummary::default();
        for item in items {
            summary.total_items += 1;
            *summary.by_condition.entry(item.condition).or_insert(0) += 1;
            if let Some(rating) = item.rating {
                *summary.by_rating.entry(rating).or_insert(0) += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_labels_map_exactly() {
        assert_eq!(ItemCondition::from_grading_label("Mint (M)"), ItemCondition::Mint);
        assert_eq!(
            ItemCondition::from_grading_label("Near Mint (NM or M-)"),
            ItemCondition::NearMint
        );
        assert_eq!(
            ItemCondition::from_grading_label("Very Good Plus (VG+)"),
            ItemCondition::VeryGoodPlus
        );
        assert_eq!(
            ItemCondition::from_grading_label("Very Good (VG)"),
            ItemCondition::VeryGood
        );
        assert_eq!(
            ItemCondition::from_grading_label("Good Plus (G+)"),
            ItemCondition::GoodPlus
        );
        assert_eq!(ItemCondition::from_grading_label("Good (G)"), ItemCondition::Good);
        assert_eq!(ItemCondition::from_grading_label("Fair (F)"), ItemCondition::Fair);
        assert_eq!(ItemCondition::from_grading_label("Poor (P)"), ItemCondition::Poor);
    }

    #[test]
    fn unknown_grading_labels_fall_back_to_good() {
        for label in ["", "VG+", "mint (m)", "Generic", "Sealed", " Mint (M)"] {
            assert_eq!(ItemCondition::from_grading_label(label), ItemCondition::Good);
        }
    }

    #[test]
    fn db_strings_round_trip() {
        for condition in ItemCondition::ALL {
            assert_eq!(
                ItemCondition::from_db_str(condition.as_db_str()),
                Some(condition)
            );
        }
        assert_eq!(ItemCondition::from_db_str("SEALED"), None);
    }

    #[test]
    fn rating_range() {
        assert!(!is_valid_rating(0));
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(6));
        assert!(!is_valid_rating(-3));
    }

    #[test]
    fn summary_counts_conditions_and_ratings() {
        let item = |id, condition, rating| CollectionItem {
            id,
            collection_id: 1,
            release_id: id,
            condition,
            rating,
            notes: None,
            added_at: None,
        };
        let items = vec![
            item(1, ItemCondition::Mint, Some(5)),
            item(2, ItemCondition::Mint, None),
            item(3, ItemCondition::Fair, Some(2)),
        ];
        let summary = CollectionSummary::from_items(&items);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.by_condition.get(&ItemCondition::Mint), Some(&2));
        assert_eq!(summary.by_condition.get(&ItemCondition::Fair), Some(&1));
        assert_eq!(summary.by_rating.get(&5), Some(&1));
        assert_eq!(summary.by_rating.get(&2), Some(&1));
        assert_eq!(summary.by_rating.len(), 2);
    }
}
