use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use log::debug;

use crate::errors::CorpusError;
use crate::file_utils::FileManager;

// @module: Corpus document model, loading and writing

/// Number of surahs in the canonical corpus
pub const SURAH_COUNT: u32 = 114;

/// One rare-word gloss from a named reference work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossEntry {
    /// The rare or unusual Quranic word
    pub word: String,
    /// Its explanation in the reference work
    pub meaning: String,
}

/// A gloss slot for one reference work.
///
/// The corpus stores an absent gloss as an empty JSON object rather than
/// omitting the key, so the slot is a sum type whose `Empty` variant
/// serializes as `{}` to stay wire-compatible with existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlossSlot {
    /// A populated gloss
    Present(GlossEntry),
    /// No gloss recorded, serialized as `{}`
    Empty {},
}

impl Default for GlossSlot {
    fn default() -> Self {
        GlossSlot::Empty {}
    }
}

impl GlossSlot {
    /// Whether the slot holds a gloss
    pub fn is_present(&self) -> bool {
        matches!(self, GlossSlot::Present(_))
    }

    /// The gloss, if one is present
    pub fn entry(&self) -> Option<&GlossEntry> {
        match self {
            GlossSlot::Present(entry) => Some(entry),
            GlossSlot::Empty {} => None,
        }
    }
}

/// Rare-word glosses for one verse, one slot per reference work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gharib {
    /// Gloss from the Muyassar reference
    #[serde(default)]
    pub muyassar: GlossSlot,
    /// Gloss from the Siraj reference
    #[serde(default)]
    pub siraj: GlossSlot,
}

impl Gharib {
    /// Whether either slot holds a gloss
    pub fn is_annotated(&self) -> bool {
        self.muyassar.is_present() || self.siraj.is_present()
    }
}

/// A companion-video reference attached to a verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    /// YouTube video identifier, the deduplication key
    #[serde(rename = "videoId")]
    pub video_id: String,
    /// Canonical watch URL, derived from the video id
    pub url: String,
    /// Episode title
    pub title: String,
    /// The word or phrase the episode discusses
    pub word: String,
}

/// One verse within a surah document.
///
/// Only `gharib` and `shehri_videos` are ever mutated by the pipeline; the
/// verse text is authoritative and the tafsir map is opaque. Fields this
/// tool does not know about are captured verbatim so a load/write round
/// trip never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ayah {
    /// Verse number within its surah, 1-based
    pub number: u32,
    /// Arabic verse text, never modified
    pub text: String,
    /// Commentary keyed by source name, not touched by the merge pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tafsir: Option<Map<String, Value>>,
    /// Rare-word glosses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gharib: Option<Gharib>,
    /// Companion videos, deduplicated by video id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shehri_videos: Option<Vec<VideoRef>>,
    /// Any other fields, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One corpus document, holding a whole surah.
///
/// After [`load_document`] returns, `ayat` is populated and `ayahs` is gone:
/// the legacy key is folded into `ayat` during loading and never written
/// back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahDocument {
    /// Surah number, 1-114; optional because older documents rely on the
    /// filename alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// The verses, in canonical order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayat: Option<Vec<Ayah>>,
    /// Legacy alias for `ayat`, accepted on input only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayahs: Option<Vec<Ayah>>,
    /// Any other fields (name, revelation type, juz...), preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SurahDocument {
    /// The verses of this document, empty if the document has none
    pub fn verses(&self) -> &[Ayah] {
        self.ayat.as_deref().unwrap_or(&[])
    }

    /// Mutable iterator over the verses
    pub fn verses_mut(&mut self) -> impl Iterator<Item = &mut Ayah> {
        self.ayat.iter_mut().flatten()
    }
}

/// Load one corpus document and normalize it.
///
/// `derived_number` is the surah number parsed from the filename. Loading
/// validates it against the canonical range and against the document's own
/// `number` field when one is present, folds the legacy `ayahs` key into
/// `ayat`, and guarantees the returned document has a populated verse list.
pub fn load_document(path: &Path, derived_number: u32) -> Result<SurahDocument, CorpusError> {
    if !(1..=SURAH_COUNT).contains(&derived_number) {
        return Err(CorpusError::OutOfRange(derived_number));
    }

    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        file: path.display().to_string(),
        source,
    })?;

    let mut document: SurahDocument =
        serde_json::from_str(&content).map_err(|source| CorpusError::Parse {
            file: path.display().to_string(),
            source,
        })?;

    if let Some(declared) = document.number {
        if declared != derived_number {
            return Err(CorpusError::NumberMismatch {
                file: path.display().to_string(),
                declared,
                derived: derived_number,
            });
        }
    }

    // Fold the legacy key into the canonical one
    if document.ayat.is_none() {
        document.ayat = document.ayahs.take();
    } else if document.ayahs.take().is_some() {
        debug!("Surah {} carries both ayat and ayahs, keeping ayat", derived_number);
    }

    if document.ayat.is_none() {
        return Err(CorpusError::MissingVerses(derived_number));
    }

    Ok(document)
}

/// Write a document back to its originating path.
///
/// Output is pretty-printed with 2-space indentation for diff-friendliness
/// and replaced atomically via a temp-file-then-rename, so a crash mid-write
/// cannot leave a torn document behind.
pub fn write_document(document: &SurahDocument, path: &Path) -> Result<(), CorpusError> {
    let mut content =
        serde_json::to_string_pretty(document).map_err(|source| CorpusError::Write {
            file: path.display().to_string(),
            message: source.to_string(),
        })?;
    content.push('\n');

    FileManager::write_atomic(path, &content).map_err(|source| CorpusError::Write {
        file: path.display().to_string(),
        message: source.to_string(),
    })
}
