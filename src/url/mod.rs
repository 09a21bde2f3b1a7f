//! URL handling module for sqlsweep
//!
//! This module provides the legacy href normalization used for all stored
//! URLs and the domain scope filter applied to discovered links.

mod normalize;
mod scope;

pub use normalize::{authority, normalize_href, normalize_seed, NormalizedLink};
pub use scope::ScopePolicy;
