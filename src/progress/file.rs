//! File-backed progress store (standalone mode)

use crate::progress::{ProgressError, ProgressStore, TestResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

/// Progress store that persists the full result mapping to a JSON file after
/// every write.
///
/// The file is a JSON object keyed by normalized URL strings, each value
/// `{"state": ..., "finding": ..., "error": ...}`. Writes go to a temporary
/// sibling file first and are renamed into place, so an interrupted run never
/// leaves a truncated result file behind.
pub struct FileStore {
    path: PathBuf,
    results: BTreeMap<String, TestResult>,
}

impl FileStore {
    /// Opens a file-backed store, reconstructing prior state when the file
    /// exists.
    ///
    /// A malformed or unreadable prior-state file fails construction rather
    /// than silently starting an empty crawl: the file is the resume
    /// authority, and discarding it would retest every URL it recorded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let path = path.into();

        let results = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| ProgressError::Read {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| ProgressError::Corrupt {
                path: path.display().to_string(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        if !results.is_empty() {
            tracing::info!(
                "Resuming from {}: {} urls already tested",
                path.display(),
                results.len()
            );
        }

        Ok(Self { path, results })
    }

    /// Returns the recorded result for a URL, if any.
    pub fn get(&self, url: &str) -> Option<&TestResult> {
        self.results.get(url)
    }

    /// Number of recorded results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true when no results have been recorded.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn persist(&self) -> Result<(), ProgressError> {
        let json =
            serde_json::to_string_pretty(&self.results).map_err(ProgressError::Encode)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| ProgressError::Write {
            path: tmp.display().to_string(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ProgressError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

impl ProgressStore for FileStore {
    fn urls(&self) -> BTreeSet<String> {
        self.results.keys().cloned().collect()
    }

    fn contains(&self, url: &str) -> bool {
        self.results.contains_key(url)
    }

    fn store_result(&mut self, url: &str, result: TestResult) -> Result<(), ProgressError> {
        self.results.insert(url.to_string(), result);
        self.persist()
    }
}
