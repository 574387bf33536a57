/*!
 * Tests for the corpus document model, loader and writer
 */

use anyhow::Result;
use serde_json::Value;
use gharib::corpus::{self, GlossEntry, GlossSlot};
use gharib::errors::CorpusError;
use crate::common;

/// Test that a well-formed document loads with its verses populated
#[test]
fn test_load_document_withValidFile_shouldPopulateAyat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_naba_document(temp_dir.path())?;

    let document = corpus::load_document(&path, 78)?;

    assert_eq!(document.number, Some(78));
    assert_eq!(document.verses().len(), 3);
    assert_eq!(document.verses()[0].number, 1);
    assert!(document.ayahs.is_none());

    Ok(())
}

/// Test that the legacy ayahs key is folded into ayat by value
#[test]
fn test_load_document_withLegacyAyahsKey_shouldNormalizeToAyat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_legacy_document(temp_dir.path(), 12)?;

    let original: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let document = corpus::load_document(&path, 12)?;

    // The normalized ayat sequence equals the original ayahs sequence by value
    let normalized = serde_json::to_value(document.verses())?;
    assert_eq!(normalized, original["ayahs"]);
    assert!(document.ayahs.is_none());

    Ok(())
}

/// Test that the ayahs key is gone after a write following normalization
#[test]
fn test_write_document_afterNormalization_shouldDropLegacyKey() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_legacy_document(temp_dir.path(), 12)?;

    let document = corpus::load_document(&path, 12)?;
    corpus::write_document(&document, &path)?;

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert!(written.get("ayahs").is_none());
    assert_eq!(written["ayat"].as_array().map(|a| a.len()), Some(2));

    Ok(())
}

/// Test that a document with neither ayat nor ayahs is rejected
#[test]
fn test_load_document_withNoVerses_shouldReturnMissingVersesError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "9.json", r#"{"name": "التوبة"}"#)?;

    let result = corpus::load_document(&path, 9);
    assert!(matches!(result, Err(CorpusError::MissingVerses(9))));

    Ok(())
}

/// Test that malformed JSON is a recoverable parse error, not a panic
#[test]
fn test_load_document_withMalformedJson_shouldReturnParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "5.json", "{not json")?;

    let result = corpus::load_document(&path, 5);
    assert!(matches!(result, Err(CorpusError::Parse { .. })));

    Ok(())
}

/// Test that a document disagreeing with its filename is rejected
#[test]
fn test_load_document_withNumberMismatch_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "7.json",
        r#"{"number": 8, "ayat": [{"number": 1, "text": "x"}]}"#,
    )?;

    let result = corpus::load_document(&path, 7);
    assert!(matches!(
        result,
        Err(CorpusError::NumberMismatch { declared: 8, derived: 7, .. })
    ));

    Ok(())
}

/// Test that a filename outside the canonical surah range is rejected
#[test]
fn test_load_document_withOutOfRangeNumber_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "999.json",
        r#"{"ayat": [{"number": 1, "text": "x"}]}"#,
    )?;

    let result = corpus::load_document(&path, 999);
    assert!(matches!(result, Err(CorpusError::OutOfRange(999))));

    Ok(())
}

/// Test that a load/write round trip preserves every field, including ones
/// the pipeline does not model explicitly
#[test]
fn test_write_document_afterLoad_shouldRoundTripAllFields() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = r#"{
  "number": 78,
  "name": "النبأ",
  "revelation": "مكية",
  "juz": 30,
  "ayat": [
    {
      "number": 34,
      "text": "وَكَأْسًا دِهَاقًا",
      "tafsir": { "muyassar": "وكأسا مملوءة متتابعة", "saadi": "..." },
      "gharib": { "muyassar": {}, "siraj": {} },
      "translation": "And a full cup"
    }
  ]
}
"#;
    let path = common::create_test_file(temp_dir.path(), "78.json", content)?;

    let before: Value = serde_json::from_str(content)?;
    let document = corpus::load_document(&path, 78)?;
    corpus::write_document(&document, &path)?;
    let after: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    assert_eq!(before, after);

    Ok(())
}

/// Test that written documents are pretty-printed with a trailing newline
#[test]
fn test_write_document_shouldUseTwoSpaceIndentation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_naba_document(temp_dir.path())?;

    let document = corpus::load_document(&path, 78)?;
    corpus::write_document(&document, &path)?;

    let written = std::fs::read_to_string(&path)?;
    assert!(written.starts_with("{\n  \""));
    assert!(written.ends_with("\n"));

    Ok(())
}

/// Test that an empty object deserializes as an empty gloss slot
#[test]
fn test_gloss_slot_withEmptyObject_shouldDeserializeAsEmpty() -> Result<()> {
    let slot: GlossSlot = serde_json::from_str("{}")?;
    assert!(!slot.is_present());
    assert_eq!(serde_json::to_string(&slot)?, "{}");
    Ok(())
}

/// Test that a populated slot round-trips through its wire form
#[test]
fn test_gloss_slot_withEntry_shouldRoundTrip() -> Result<()> {
    let slot = GlossSlot::Present(GlossEntry {
        word: "دِهَاقًا".to_string(),
        meaning: "مملوءة".to_string(),
    });

    let json = serde_json::to_string(&slot)?;
    let back: GlossSlot = serde_json::from_str(&json)?;

    assert_eq!(back, slot);
    assert_eq!(back.entry().map(|e| e.word.as_str()), Some("دِهَاقًا"));
    Ok(())
}
