//! Shared constants for integration tests

/// Handle used for the importing user
pub const TEST_USER: &str = "sag";

/// Header line of a collection export, including the columns the importer
/// ignores
pub const EXPORT_HEADER: &str = "Catalog#,Artist,Title,Label,Format,Rating,Released,release_id,CollectionFolder,Date Added,Collection Media Condition,Collection Sleeve Condition,Collection Notes";

/// Every grading label an export can carry, with the stored condition
pub const GRADING_LABELS: &[(&str, &str)] = &[
    ("Mint (M)", "MINT"),
    ("Near Mint (NM or M-)", "NEAR_MINT"),
    ("Very Good Plus (VG+)", "VERY_GOOD_PLUS"),
    ("Very Good (VG)", "VERY_GOOD"),
    ("Good Plus (G+)", "GOOD_PLUS"),
    ("Good (G)", "GOOD"),
    ("Fair (F)", "FAIR"),
    ("Poor (P)", "POOR"),
];
