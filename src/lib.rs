//! Sqlsweep: a resumable SQL-injection form crawler
//!
//! This crate implements a crawler that starts from a seed URL, discovers
//! reachable in-scope pages, and tests every HTML form it finds for reflected
//! SQL injection by submitting crafted payloads and matching database error
//! signatures in the response body.

pub mod config;
pub mod crawler;
pub mod progress;
pub mod tester;
pub mod url;

use thiserror::Error;

/// Main error type for sqlsweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("Progress store error: {0}")]
    Progress(#[from] progress::ProgressError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Session hook failed: {0}")]
    Hook(#[source] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Failed to read payload file: {0}")]
    PayloadFile(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sqlsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, FetchError, Fetcher, ScanReport, SessionHook};
pub use progress::{FileStore, ProgressStore, ServiceStore, TestResult, TestState};
pub use url::{normalize_href, normalize_seed, ScopePolicy};
