//! Progress store: the persisted URL -> result mapping
//!
//! The store is the single source of truth for which URLs have already been
//! tested. Its key set drives both deduplication during a run and resumption
//! across runs. Two variants share one contract: a file-backed store that
//! dumps the full mapping as JSON after every write, and a service-backed
//! store that delegates to an external datastore keyed by an opaque record id.

mod file;
mod service;

pub use file::FileStore;
pub use service::{CrawlDatastore, ServiceStore};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Progress store errors
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Failed to read prior results from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Prior results at {path} are malformed: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to persist results to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to encode results: {0}")]
    Encode(serde_json::Error),

    #[error("Datastore error for record {record_id}: {message}")]
    Datastore { record_id: String, message: String },
}

/// Terminal classification of a tested URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Safe,
    Vulnerable,
    Failure,
}

/// The recorded outcome for one URL. Exactly one result exists per tested
/// URL; a rewrite replaces the previous value wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub state: TestState,
    pub finding: Option<String>,
    pub error: Option<String>,
}

impl TestResult {
    /// No form on the page matched any signature (including no forms at all).
    pub fn safe() -> Self {
        Self {
            state: TestState::Safe,
            finding: None,
            error: None,
        }
    }

    /// A payload produced a response matching a database error signature.
    pub fn vulnerable(finding: impl Into<String>) -> Self {
        Self {
            state: TestState::Vulnerable,
            finding: Some(finding.into()),
            error: None,
        }
    }

    /// The URL could not be fetched or tested.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            state: TestState::Failure,
            finding: None,
            error: Some(error.into()),
        }
    }
}

/// Capability contract shared by both store variants.
///
/// The crawl core depends only on these methods, never on which variant is
/// active.
pub trait ProgressStore: Send {
    /// Ordered set of every URL with a recorded result. This is the
    /// authoritative "already tested" set for dedup and resume.
    fn urls(&self) -> BTreeSet<String>;

    /// Membership test against the same set `urls` returns.
    fn contains(&self, url: &str) -> bool;

    /// Upserts the result for a URL and persists the full current mapping
    /// before returning.
    fn store_result(&mut self, url: &str, result: TestResult) -> Result<(), ProgressError>;
}
