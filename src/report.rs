use std::path::Path;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::merge::MergeStats;

// @module: Machine-readable run reporting

/// One document the batch could not process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// Path of the document
    pub file: String,
    /// Human-readable description of what went wrong
    pub error: String,
}

/// Machine-readable summary of one batch run.
///
/// The console summary is for the operator; this is the same information as
/// a JSON document, written when the run is invoked with `--report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Which operation ran (apply-gharib, apply-videos)
    pub command: String,
    /// Corpus directory the run operated on
    pub corpus_dir: String,
    /// Reference dataset path, when the operation takes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// Local completion timestamp
    pub completed_at: String,
    /// Counters accumulated over the run
    pub stats: MergeStats,
    /// Documents that were skipped or failed
    pub errors: Vec<FileError>,
}

impl RunReport {
    /// Assemble a report for a finished run, stamped with the current time
    pub fn new(
        command: &str,
        corpus_dir: &str,
        dataset: Option<&str>,
        dry_run: bool,
        stats: MergeStats,
        errors: Vec<FileError>,
    ) -> Self {
        RunReport {
            command: command.to_string(),
            corpus_dir: corpus_dir.to_string(),
            dataset: dataset.map(|d| d.to_string()),
            dry_run,
            completed_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            stats,
            errors,
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)
            .context("Failed to serialize run report")?;
        content.push('\n');
        FileManager::write_atomic(path, &content)
            .with_context(|| format!("Failed to write run report: {:?}", path))
    }
}
