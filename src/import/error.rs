use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where in the per-record flow processing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStage {
    Parse,
    ResolveArtists,
    ResolveLabel,
    ResolveFormat,
    ResolveRelease,
    ReconcileMembership,
}

impl fmt::Display for RecordStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordStage::Parse => "parse",
            RecordStage::ResolveArtists => "resolve artists",
            RecordStage::ResolveLabel => "resolve label",
            RecordStage::ResolveFormat => "resolve format",
            RecordStage::ResolveRelease => "resolve release",
            RecordStage::ReconcileMembership => "reconcile membership",
        };
        f.write_str(name)
    }
}

/// A failure confined to a single input record.
#[derive(Debug, Error)]
#[error("Record \"{title}\" failed at {stage}: {source:#}")]
pub struct RecordError {
    pub stage: RecordStage,
    pub title: String,
    #[source]
    pub source: anyhow::Error,
}

impl RecordError {
    pub fn new(stage: RecordStage, title: &str, source: anyhow::Error) -> Self {
        Self {
            stage,
            title: title.to_string(),
            source,
        }
    }
}

/// Errors that end an import run. Per-record failures never do; they
/// only show up in the report.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Missing or invalid invocation arguments; nothing was touched.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input or the importing user could not be prepared.
    #[error("Setup failed: {0:#}")]
    Setup(#[source] anyhow::Error),
}
