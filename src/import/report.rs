use super::error::RecordStage;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordResult {
    Imported,
    AlreadyInCollection,
    Failed { stage: RecordStage, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    /// 1-based data row in the input file.
    pub row: usize,
    pub title: String,
    pub artist: String,
    #[serde(flatten)]
    pub result: RecordResult,
}

/// Totals of one import run. `skipped` counts both records already in the
/// collection and records that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
    pub trace: Vec<RecordOutcome>,
}

impl ImportReport {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.total += 1;
        match outcome.result {
            RecordResult::Imported => self.imported += 1,
            RecordResult::AlreadyInCollection | RecordResult::Failed { .. } => self.skipped += 1,
        }
        self.trace.push(outcome);
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.trace
            .iter()
            .filter(|o| matches!(o.result, RecordResult::Failed { .. }))
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Cannot create {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Cannot write report to {:?}", path))?;
        Ok(())
    }
}
