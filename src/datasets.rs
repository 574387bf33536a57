use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::corpus::{SurahDocument, SURAH_COUNT};
use crate::errors::DatasetError;
use crate::file_utils::FileManager;

// @module: Reference datasets consumed and produced by the merge pipeline

/// One row of a gharib reference dataset.
///
/// A row documents a single rare word with its explanation in both reference
/// works. Multiple rows may share a (surah, verse) key, since a verse can
/// contain more than one documented rare word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GharibRecord {
    /// Surah number the word occurs in
    pub surah: u32,
    /// Verse number within that surah
    pub verse: u32,
    /// The rare word or phrase
    pub word: String,
    /// Explanation from the Muyassar reference
    pub muyassar: String,
    /// Explanation from the Siraj reference
    pub siraj: String,
}

/// One row of a companion-video mapping dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMapping {
    /// Surah number the episode covers
    pub surah: u32,
    /// Verse number within that surah
    pub verse: u32,
    /// The word or phrase the episode discusses
    pub word: String,
    /// YouTube video identifier
    #[serde(rename = "videoId")]
    pub video_id: String,
    /// Episode title
    pub title: String,
}

/// Load a gharib reference dataset from a JSON file
pub fn load_gharib_dataset(path: &Path) -> Result<Vec<GharibRecord>, DatasetError> {
    let records: Vec<GharibRecord> = load_json(path)?;
    for (index, record) in records.iter().enumerate() {
        validate_key(index, record.surah, record.verse)?;
    }
    Ok(records)
}

/// Load a companion-video mapping dataset from a JSON file
pub fn load_video_dataset(path: &Path) -> Result<Vec<VideoMapping>, DatasetError> {
    let mappings: Vec<VideoMapping> = load_json(path)?;
    for (index, mapping) in mappings.iter().enumerate() {
        validate_key(index, mapping.surah, mapping.verse)?;
        if mapping.video_id.is_empty() {
            return Err(DatasetError::InvalidRecord {
                index,
                reason: "empty videoId".to_string(),
            });
        }
    }
    Ok(mappings)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        file: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        file: path.display().to_string(),
        source,
    })
}

fn validate_key(index: usize, surah: u32, verse: u32) -> Result<(), DatasetError> {
    if !(1..=SURAH_COUNT).contains(&surah) {
        return Err(DatasetError::InvalidRecord {
            index,
            reason: format!("surah {} outside canonical range 1-{}", surah, SURAH_COUNT),
        });
    }
    if verse == 0 {
        return Err(DatasetError::InvalidRecord {
            index,
            reason: "verse numbers are 1-based".to_string(),
        });
    }
    Ok(())
}

/// Harvest the gloss annotations already present in a document back into
/// dataset rows.
///
/// Every verse with at least one populated slot contributes one row. The
/// word is taken from the Muyassar slot when present, from the Siraj slot
/// otherwise; a missing slot contributes an empty meaning. Rows come out in
/// verse order.
pub fn extract_records(document: &SurahDocument, surah: u32) -> Vec<GharibRecord> {
    let mut records = Vec::new();

    for ayah in document.verses() {
        let Some(gharib) = &ayah.gharib else { continue };
        if !gharib.is_annotated() {
            continue;
        }

        let word = gharib
            .muyassar
            .entry()
            .or_else(|| gharib.siraj.entry())
            .map(|entry| entry.word.clone())
            .unwrap_or_default();

        records.push(GharibRecord {
            surah,
            verse: ayah.number,
            word,
            muyassar: gharib
                .muyassar
                .entry()
                .map(|entry| entry.meaning.clone())
                .unwrap_or_default(),
            siraj: gharib
                .siraj
                .entry()
                .map(|entry| entry.meaning.clone())
                .unwrap_or_default(),
        });
    }

    records
}

/// Write a gharib dataset to a JSON file, pretty-printed, atomically
pub fn write_dataset(records: &[GharibRecord], path: &Path) -> anyhow::Result<()> {
    let mut content = serde_json::to_string_pretty(records)?;
    content.push('\n');
    FileManager::write_atomic(path, &content)
}
