/*!
 * # gharib - Quran-corpus annotation merge tool
 *
 * A Rust library for maintaining the per-surah JSON corpus behind a
 * Quran-reading application.
 *
 * ## Features
 *
 * - Merge rare-word ("gharib") gloss datasets into corpus documents,
 *   keyed by (surah, verse), under a single deterministic merge policy
 * - Merge companion-video mappings, deduplicated by video id
 * - Extract existing gloss annotations back out into a dataset file
 * - Legacy corpus normalization (`ayahs` key folded into `ayat`)
 * - Per-file fault isolation: one bad document never stops the batch
 * - Atomic document writes (temp-file-then-rename)
 * - Dry-run mode and machine-readable run reports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `corpus`: Corpus document model, loading and writing
 * - `datasets`: Reference dataset records, loading and extraction
 * - `merge`: The merge policy and the gloss/video matchers
 * - `report`: Machine-readable run reports
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod corpus;
pub mod datasets;
pub mod errors;
pub mod file_utils;
pub mod merge;
pub mod report;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions};
pub use corpus::{Ayah, Gharib, GlossEntry, GlossSlot, SurahDocument, VideoRef};
pub use datasets::{GharibRecord, VideoMapping};
pub use errors::{AppError, CorpusError, DatasetError};
pub use merge::MergeStats;
pub use report::{FileError, RunReport};
