use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::corpus::{self, SurahDocument};
use crate::datasets;
use crate::errors::CorpusError;
use crate::file_utils::FileManager;
use crate::merge::{self, MergeStats};
use crate::report::{FileError, RunReport};

// @module: Application controller for corpus batch runs

/// Options shared by the merge operations
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report counts without writing any document back
    pub dry_run: bool,
    /// Where to write the machine-readable run report, if anywhere
    pub report_path: Option<PathBuf>,
}

/// Main application controller for corpus annotation runs
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Merge a gharib reference dataset into every corpus document
    pub fn run_apply_gharib(&self, dataset_path: &Path, options: &RunOptions) -> Result<RunReport> {
        let dataset = datasets::load_gharib_dataset(dataset_path)
            .with_context(|| format!("Failed to load gharib dataset: {:?}", dataset_path))?;

        info!("Applying gharib dataset ({} entries)...", dataset.len());

        let (stats, errors) = self.process_corpus(options, |document, surah, stats| {
            merge::apply_gharib(document, surah, &dataset, stats);
        })?;

        info!(
            "Complete: {} surahs processed, {} verses with gharib, {} glosses added",
            stats.files_processed, stats.verses_touched, stats.glosses_added
        );

        self.finish_run("apply-gharib", Some(dataset_path), options, stats, errors)
    }

    /// Merge a companion-video mapping dataset into every corpus document
    pub fn run_apply_videos(&self, dataset_path: &Path, options: &RunOptions) -> Result<RunReport> {
        let mappings = datasets::load_video_dataset(dataset_path)
            .with_context(|| format!("Failed to load video dataset: {:?}", dataset_path))?;

        info!("Applying video mappings ({} entries)...", mappings.len());

        let (stats, errors) = self.process_corpus(options, |document, surah, stats| {
            merge::apply_videos(document, surah, &mappings, stats);
        })?;

        info!(
            "Complete: {} surahs processed, {} videos added",
            stats.files_processed, stats.videos_added
        );

        self.finish_run("apply-videos", Some(dataset_path), options, stats, errors)
    }

    /// Harvest gloss annotations from the corpus into a dataset file
    pub fn run_extract(&self, output_path: &Path) -> Result<usize> {
        let corpus_files = self.corpus_files()?;
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (surah, path) in &corpus_files {
            match corpus::load_document(path, *surah) {
                Ok(document) => {
                    records.extend(datasets::extract_records(&document, *surah));
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped += 1;
                }
            }
        }

        datasets::write_dataset(&records, output_path)
            .with_context(|| format!("Failed to write dataset: {:?}", output_path))?;

        info!(
            "Extracted {} gharib entries from {} surahs into {}",
            records.len(),
            corpus_files.len() - skipped,
            output_path.display()
        );

        Ok(records.len())
    }

    /// Enumerate the corpus, failing the run when the directory is unusable
    fn corpus_files(&self) -> Result<Vec<(u32, PathBuf)>> {
        let corpus_dir = Path::new(&self.config.corpus_dir);
        if !FileManager::dir_exists(corpus_dir) {
            return Err(anyhow::anyhow!(
                "Corpus directory does not exist: {:?}",
                corpus_dir
            ));
        }
        FileManager::find_corpus_files(corpus_dir)
    }

    /// Run one merge operation over every corpus document.
    ///
    /// Each file is a closed world: read, mutate, write, then on to the
    /// next. A failure in one document is logged and counted but never
    /// stops the batch.
    fn process_corpus<F>(
        &self,
        options: &RunOptions,
        mut apply: F,
    ) -> Result<(MergeStats, Vec<FileError>)>
    where
        F: FnMut(&mut SurahDocument, u32, &mut MergeStats),
    {
        let corpus_files = self.corpus_files()?;
        if corpus_files.is_empty() {
            warn!("No corpus documents found in {:?}", self.config.corpus_dir);
            return Ok((MergeStats::default(), Vec::new()));
        }

        if options.dry_run {
            info!("Dry run: no documents will be written");
        }

        let progress_bar = ProgressBar::new(corpus_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} surahs ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Merging");

        let mut stats = MergeStats::default();
        let mut errors = Vec::new();

        for (surah, path) in &corpus_files {
            progress_bar.set_message(format!("Surah {}", surah));

            let mut document = match corpus::load_document(path, *surah) {
                Ok(document) => document,
                Err(e) => {
                    record_failure(&mut stats, &mut errors, path, &e);
                    progress_bar.inc(1);
                    continue;
                }
            };

            apply(&mut document, *surah, &mut stats);

            if options.dry_run {
                debug!("Dry run, not writing surah {}", surah);
                stats.files_processed += 1;
            } else {
                match corpus::write_document(&document, path) {
                    Ok(()) => stats.files_processed += 1,
                    Err(e) => record_failure(&mut stats, &mut errors, path, &e),
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Processed {} surahs ({} skipped, {} failed)",
            stats.files_processed, stats.files_skipped, stats.files_failed
        );

        Ok((stats, errors))
    }

    /// Assemble the run report and write it out when requested
    fn finish_run(
        &self,
        command: &str,
        dataset_path: Option<&Path>,
        options: &RunOptions,
        stats: MergeStats,
        errors: Vec<FileError>,
    ) -> Result<RunReport> {
        let report = RunReport::new(
            command,
            &self.config.corpus_dir,
            dataset_path.map(|p| p.display().to_string()).as_deref(),
            options.dry_run,
            stats,
            errors,
        );

        if let Some(report_path) = &options.report_path {
            report.write_to(report_path)?;
            info!("Run report written to {}", report_path.display());
        }

        Ok(report)
    }
}

/// Log a per-document error and fold it into the counters.
///
/// Structural problems (missing verses, identity mismatch) count as skips;
/// I/O and parse problems count as failures. Both land in the report.
fn record_failure(
    stats: &mut MergeStats,
    errors: &mut Vec<FileError>,
    path: &Path,
    e: &CorpusError,
) {
    match e {
        CorpusError::MissingVerses(_) | CorpusError::NumberMismatch { .. } | CorpusError::OutOfRange(_) => {
            warn!("Skipping {}: {}", path.display(), e);
            stats.files_skipped += 1;
        }
        CorpusError::Io { .. } | CorpusError::Parse { .. } | CorpusError::Write { .. } => {
            error!("Error processing {}: {}", path.display(), e);
            stats.files_failed += 1;
        }
    }
    errors.push(FileError {
        file: path.display().to_string(),
        error: e.to_string(),
    });
}
