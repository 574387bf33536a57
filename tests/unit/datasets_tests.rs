/*!
 * Tests for reference dataset loading, validation and extraction
 */

use anyhow::Result;
use gharib::corpus;
use gharib::datasets::{self, GharibRecord};
use gharib::errors::DatasetError;
use gharib::merge::{apply_gharib, MergeStats};
use crate::common;

/// Test that a gharib dataset file loads into records
#[test]
fn test_load_gharib_dataset_withValidFile_shouldReturnRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_naba_gharib_dataset(temp_dir.path())?;

    let records = datasets::load_gharib_dataset(&path)?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].surah, 78);
    assert_eq!(records[0].verse, 34);
    assert_eq!(records[0].word, "دِهَاقًا");

    Ok(())
}

/// Test that a row with an out-of-range surah is rejected at load time
#[test]
fn test_load_gharib_dataset_withOutOfRangeSurah_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = r#"[{"surah": 115, "verse": 1, "word": "x", "muyassar": "a", "siraj": "b"}]"#;
    let path = common::create_test_file(temp_dir.path(), "bad.json", content)?;

    let result = datasets::load_gharib_dataset(&path);
    assert!(matches!(result, Err(DatasetError::InvalidRecord { index: 0, .. })));

    Ok(())
}

/// Test that a row with a zero verse number is rejected at load time
#[test]
fn test_load_gharib_dataset_withZeroVerse_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = r#"[{"surah": 1, "verse": 0, "word": "x", "muyassar": "a", "siraj": "b"}]"#;
    let path = common::create_test_file(temp_dir.path(), "bad.json", content)?;

    let result = datasets::load_gharib_dataset(&path);
    assert!(matches!(result, Err(DatasetError::InvalidRecord { index: 0, .. })));

    Ok(())
}

/// Test that video mappings parse the camelCase videoId key
#[test]
fn test_load_video_dataset_withValidFile_shouldParseVideoId() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_nisa_video_dataset(temp_dir.path())?;

    let mappings = datasets::load_video_dataset(&path)?;

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].video_id, "zODfN7wICGQ");
    assert_eq!(mappings[0].word, "قسمة ضيزى");

    Ok(())
}

/// Test that a mapping with an empty video id is rejected
#[test]
fn test_load_video_dataset_withEmptyVideoId_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = r#"[{"surah": 4, "verse": 3, "word": "x", "videoId": "", "title": "t"}]"#;
    let path = common::create_test_file(temp_dir.path(), "bad.json", content)?;

    let result = datasets::load_video_dataset(&path);
    assert!(matches!(result, Err(DatasetError::InvalidRecord { index: 0, .. })));

    Ok(())
}

/// Test that extraction reproduces the records a merge applied
#[test]
fn test_extract_records_afterApply_shouldReproduceAppliedRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let doc_path = common::create_naba_document(temp_dir.path())?;
    let mut document = corpus::load_document(&doc_path, 78)?;

    let applied = vec![GharibRecord {
        surah: 78,
        verse: 34,
        word: "دِهَاقًا".to_string(),
        muyassar: "مملوءة".to_string(),
        siraj: "كأسًا مملوءة".to_string(),
    }];
    let mut stats = MergeStats::default();
    apply_gharib(&mut document, 78, &applied, &mut stats);

    let extracted = datasets::extract_records(&document, 78);
    assert_eq!(extracted, applied);

    Ok(())
}

/// Test that a document without annotations contributes nothing
#[test]
fn test_extract_records_withBareDocument_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let doc_path = common::create_naba_document(temp_dir.path())?;
    let document = corpus::load_document(&doc_path, 78)?;

    assert!(datasets::extract_records(&document, 78).is_empty());

    Ok(())
}

/// Test that a written dataset parses back to the same records
#[test]
fn test_write_dataset_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_path = temp_dir.path().join("out.json");

    let records = vec![GharibRecord {
        surah: 1,
        verse: 6,
        word: "الصراط".to_string(),
        muyassar: "الطريق".to_string(),
        siraj: "الطريق المستقيم".to_string(),
    }];

    datasets::write_dataset(&records, &out_path)?;
    let back = datasets::load_gharib_dataset(&out_path)?;

    assert_eq!(back, records);

    Ok(())
}
