//! Crawler module: the crawl loop and its collaborators
//!
//! This module contains the crawl coordinator (frontier + per-URL state
//! machine), the HTTP fetcher with its persistent session, and the link
//! extractor that feeds newly discovered URLs back into the frontier.

mod coordinator;
mod extractor;
mod fetcher;

pub use coordinator::{run_scan, Coordinator, ScanReport};
pub use extractor::LinkExtractor;
pub use fetcher::{FetchError, Fetcher, Page, SessionHook};
