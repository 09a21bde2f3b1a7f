//! Service-backed progress store
//!
//! In service mode the result mapping lives in an external datastore owned by
//! the embedding application. The datastore is reached only through the
//! [`CrawlDatastore`] boundary trait; this crate never knows what sits behind
//! it.

use crate::progress::{ProgressError, ProgressStore, TestResult};
use std::collections::{BTreeMap, BTreeSet};

/// Boundary trait for the external crawl datastore.
///
/// A crawl record is keyed by an opaque id chosen by the embedding
/// application. `load` reconstructs the full mapping recorded so far; `update`
/// replaces the record with the current mapping.
pub trait CrawlDatastore: Send {
    fn load(&self, record_id: &str) -> Result<BTreeMap<String, TestResult>, ProgressError>;

    fn update(
        &mut self,
        record_id: &str,
        results: &BTreeMap<String, TestResult>,
    ) -> Result<(), ProgressError>;
}

/// Progress store that delegates persistence to an external datastore.
pub struct ServiceStore {
    record_id: String,
    backend: Box<dyn CrawlDatastore>,
    results: BTreeMap<String, TestResult>,
}

impl ServiceStore {
    /// Opens a service-backed store, loading any state the datastore already
    /// holds for the record. A load failure is fatal, matching the
    /// file-backed variant: prior state is never silently discarded.
    pub fn open(
        backend: Box<dyn CrawlDatastore>,
        record_id: impl Into<String>,
    ) -> Result<Self, ProgressError> {
        let record_id = record_id.into();
        let results = backend.load(&record_id)?;

        if !results.is_empty() {
            tracing::info!(
                "Resuming crawl record {}: {} urls already tested",
                record_id,
                results.len()
            );
        }

        Ok(Self {
            record_id,
            backend,
            results,
        })
    }

    /// Returns the recorded result for a URL, if any.
    pub fn get(&self, url: &str) -> Option<&TestResult> {
        self.results.get(url)
    }
}

impl ProgressStore for ServiceStore {
    fn urls(&self) -> BTreeSet<String> {
        self.results.keys().cloned().collect()
    }

    fn contains(&self, url: &str) -> bool {
        self.results.contains_key(url)
    }

    fn store_result(&mut self, url: &str, result: TestResult) -> Result<(), ProgressError> {
        self.results.insert(url.to_string(), result);
        self.backend.update(&self.record_id, &self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// In-memory stand-in for the external datastore.
    #[derive(Default)]
    struct FakeDatastore {
        records: Arc<Mutex<BTreeMap<String, BTreeMap<String, TestResult>>>>,
        fail_load: bool,
    }

    impl CrawlDatastore for FakeDatastore {
        fn load(&self, record_id: &str) -> Result<BTreeMap<String, TestResult>, ProgressError> {
            if self.fail_load {
                return Err(ProgressError::Datastore {
                    record_id: record_id.to_string(),
                    message: "record not found".to_string(),
                });
            }
            Ok(self
                .records
                .lock()
                .unwrap()
                .get(record_id)
                .cloned()
                .unwrap_or_default())
        }

        fn update(
            &mut self,
            record_id: &str,
            results: &BTreeMap<String, TestResult>,
        ) -> Result<(), ProgressError> {
            self.records
                .lock()
                .unwrap()
                .insert(record_id.to_string(), results.clone());
            Ok(())
        }
    }

    #[test]
    fn test_open_loads_existing_record() {
        let records = Arc::new(Mutex::new(BTreeMap::new()));
        records.lock().unwrap().insert(
            "crawl-42".to_string(),
            BTreeMap::from([("http://example.com/".to_string(), TestResult::safe())]),
        );

        let backend = FakeDatastore {
            records,
            fail_load: false,
        };
        let store = ServiceStore::open(Box::new(backend), "crawl-42").unwrap();

        assert!(store.contains("http://example.com/"));
        assert_eq!(store.urls().len(), 1);
    }

    #[test]
    fn test_store_result_updates_backend() {
        let records = Arc::new(Mutex::new(BTreeMap::new()));
        let backend = FakeDatastore {
            records: Arc::clone(&records),
            fail_load: false,
        };

        let mut store = ServiceStore::open(Box::new(backend), "crawl-1").unwrap();
        store
            .store_result("http://example.com/a", TestResult::failure("down"))
            .unwrap();

        let persisted = records.lock().unwrap();
        let record = persisted.get("crawl-1").unwrap();
        assert_eq!(
            record.get("http://example.com/a").unwrap().error.as_deref(),
            Some("down")
        );
    }

    #[test]
    fn test_load_failure_is_fatal() {
        let backend = FakeDatastore {
            records: Arc::default(),
            fail_load: true,
        };
        let result = ServiceStore::open(Box::new(backend), "missing");
        assert!(matches!(result, Err(ProgressError::Datastore { .. })));
    }
}
