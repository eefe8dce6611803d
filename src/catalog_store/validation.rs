//! Validation for catalog entities.
//!
//! Runs before anything is written so that a malformed row fails on its
//! own instead of leaving half-inserted data behind.

use super::models::NewRelease;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField {
        entity_type: &'static str,
        field: &'static str,
    },
    MissingArtists,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { entity_type, field } => {
                write!(f, "{} field '{}' is required but was empty", entity_type, field)
            }
            ValidationError::MissingArtists => {
                write!(f, "Release must be credited to at least one artist")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate the natural key of a named entity (artist, label, format...).
pub fn validate_name(entity_type: &'static str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            entity_type,
            field: "name",
        });
    }
    Ok(())
}

pub fn validate_new_release(release: &NewRelease) -> ValidationResult<()> {
    if release.title.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            entity_type: "Release",
            field: "title",
        });
    }
    if release.artist_ids.is_empty() {
        return Err(ValidationError::MissingArtists);
    }
    for track in &release.tracks {
        if track.title.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity_type: "Track",
                field: "title",
            });
        }
    }
    Ok(())
}
