/*!
 * Error types for the gharib application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::corpus::SURAH_COUNT;

/// Errors that can occur when loading or writing corpus documents
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Error reading a document from disk
    #[error("Failed to read {file}: {source}")]
    Io {
        /// Path of the document
        file: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a document as JSON
    #[error("Invalid JSON in {file}: {source}")]
    Parse {
        /// Path of the document
        file: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Document has neither an `ayat` nor a legacy `ayahs` array
    #[error("No ayat array in surah {0}")]
    MissingVerses(u32),

    /// Document declares a surah number that disagrees with its filename
    #[error("Surah number mismatch in {file}: document says {declared}, filename says {derived}")]
    NumberMismatch {
        /// Path of the document
        file: String,
        /// Number stored inside the document
        declared: u32,
        /// Number derived from the filename
        derived: u32,
    },

    /// Filename-derived surah number falls outside the canonical range
    #[error("Surah number {0} is outside the canonical range 1-{max}", max = SURAH_COUNT)]
    OutOfRange(u32),

    /// Error writing a document back to disk
    #[error("Failed to write {file}: {message}")]
    Write {
        /// Path of the document
        file: String,
        /// Description of the failure
        message: String,
    },
}

/// Errors that can occur when loading a reference dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Error reading the dataset file
    #[error("Failed to read dataset {file}: {source}")]
    Io {
        /// Path of the dataset
        file: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the dataset as JSON
    #[error("Invalid JSON in dataset {file}: {source}")]
    Parse {
        /// Path of the dataset
        file: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A dataset row references an impossible (surah, verse) key
    #[error("Invalid dataset record at index {index}: {reason}")]
    InvalidRecord {
        /// Zero-based row index in the dataset
        index: usize,
        /// What is wrong with the row
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the corpus layer
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Error from a reference dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
