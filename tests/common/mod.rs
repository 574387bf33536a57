/*!
 * Common test utilities for the gharib test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a corpus document for surah 78 with three bare verses
pub fn create_naba_document(dir: &Path) -> Result<PathBuf> {
    let content = r#"{
  "number": 78,
  "name": "النبأ",
  "ayat": [
    { "number": 1, "text": "عَمَّ يَتَسَاءَلُونَ" },
    { "number": 14, "text": "وَأَنزَلْنَا مِنَ الْمُعْصِرَاتِ مَاءً ثَجَّاجًا" },
    { "number": 34, "text": "وَكَأْسًا دِهَاقًا" }
  ]
}
"#;
    create_test_file(dir, "78.json", content)
}

/// Creates a corpus document for surah 4 with one verse and no annotations
pub fn create_nisa_document(dir: &Path) -> Result<PathBuf> {
    let content = r#"{
  "ayat": [
    { "number": 3, "text": "وَإِنْ خِفْتُمْ أَلَّا تُقْسِطُوا فِي الْيَتَامَىٰ" }
  ]
}
"#;
    create_test_file(dir, "4.json", content)
}

/// Creates a legacy corpus document that stores its verses under `ayahs`
pub fn create_legacy_document(dir: &Path, number: u32) -> Result<PathBuf> {
    let content = format!(
        r#"{{
  "ayahs": [
    {{ "number": 1, "text": "verse one of surah {number}" }},
    {{ "number": 2, "text": "verse two of surah {number}" }}
  ]
}}
"#
    );
    create_test_file(dir, &format!("{number}.json"), &content)
}

/// Creates a gharib dataset file with one record for surah 78, verse 34
pub fn create_naba_gharib_dataset(dir: &Path) -> Result<PathBuf> {
    let content = r#"[
  {
    "surah": 78,
    "verse": 34,
    "word": "دِهَاقًا",
    "muyassar": "مملوءة",
    "siraj": "كأسًا مملوءة"
  }
]
"#;
    create_test_file(dir, "gharib-dataset.json", content)
}

/// Creates a video mapping dataset file with one episode for surah 4, verse 3
pub fn create_nisa_video_dataset(dir: &Path) -> Result<PathBuf> {
    let content = r#"[
  {
    "surah": 4,
    "verse": 3,
    "word": "قسمة ضيزى",
    "videoId": "zODfN7wICGQ",
    "title": "برنامج ( غريب القرآن ) || الحلقة 27 - { قسمة ضيزى }"
  }
]
"#;
    create_test_file(dir, "video-dataset.json", content)
}
