//! Configuration module for sqlsweep
//!
//! Configuration is a TOML file with kebab-case keys, parsed with serde and
//! validated before any crawl state is constructed.

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_payloads};
pub use types::{Config, HttpConfig, ResultsConfig, ScanConfig, StoreMode};
pub use validation::validate;
