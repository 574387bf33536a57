use anyhow::{Result, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Corpus filename regex (surah number stem, .json extension)
static CORPUS_FILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\.json$").unwrap()
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence - used by tests and external consumers
    #[allow(dead_code)]
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find corpus document files in a directory.
    ///
    /// A corpus file is named by its surah number with a `.json` extension
    /// (e.g. `78.json`). Files whose stem does not parse as an integer are
    /// not corpus documents (`index.json`, editor droppings) and are skipped
    /// without comment. The result is sorted by surah number so batch runs
    /// are deterministic.
    pub fn find_corpus_files<P: AsRef<Path>>(dir: P) -> Result<Vec<(u32, PathBuf)>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let file_name = match path.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => continue,
            };

            if let Some(captures) = CORPUS_FILE_REGEX.captures(&file_name) {
                if let Ok(number) = captures[1].parse::<u32>() {
                    result.push((number, path.to_path_buf()));
                }
            }
        }

        result.sort_by_key(|(number, _)| *number);
        Ok(result)
    }

    /// Atomically replace a file with the given content.
    ///
    /// The content is written to a temporary file in the same directory and
    /// renamed over the target, so the target is always either its previous
    /// version or the new one. A crash mid-write never leaves a half-written
    /// document behind.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;

        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temporary file for {:?}", path))?;

        temp.persist(path)
            .with_context(|| format!("Failed to replace file: {:?}", path))?;

        Ok(())
    }
}
