//! Legacy href normalization
//!
//! Discovered hrefs are reduced to `scheme://host/path` before any storage or
//! comparison: the query string and fragment are always discarded, missing
//! scheme/host components are taken from the base URL, and literal `"../"`
//! substrings are deleted from the path textually rather than resolved
//! segment by segment. Result files produced by earlier versions of this
//! scanner used exactly these rules, so they are kept byte for byte.

use crate::{UrlError, UrlResult};
use url::Url;

/// A normalized candidate link produced from an anchor href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLink {
    /// The full normalized URL (`scheme://host/path`).
    pub url: String,

    /// The host (with port, when present) the URL points at.
    pub host: String,

    /// Whether the href spelled out its own host rather than inheriting
    /// the base URL's. The scope filter only applies to explicit hosts.
    pub explicit_host: bool,
}

/// Normalizes an anchor href against a base URL.
///
/// Returns `None` for hrefs the crawler never follows:
/// - the literal `"."`
/// - hrefs with an explicit scheme other than `http` or `https`
/// - hrefs whose resolved path is empty (fragment-only anchors, bare hosts)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sqlsweep::url::normalize_href;
///
/// let base = Url::parse("http://example.com/app/").unwrap();
/// let link = normalize_href("page?id=3#top", &base).unwrap();
/// assert_eq!(link.url, "http://example.com/page");
/// assert!(!link.explicit_host);
/// ```
pub fn normalize_href(href: &str, base: &Url) -> Option<NormalizedLink> {
    let href = href.trim();

    if href == "." {
        return None;
    }

    let (scheme, host, rest) = split_href(href);

    // An explicit scheme must be empty, http, or https
    if let Some(s) = scheme {
        let s = s.to_ascii_lowercase();
        if !s.is_empty() && s != "http" && s != "https" {
            return None;
        }
    }

    // Discard query string and fragment entirely
    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
    let mut path = rest[..path_end].to_string();

    if path.is_empty() {
        return None;
    }

    // Force a leading slash, then delete literal "../" substrings. This is
    // textual deletion, not path-segment resolution.
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    let path = path.replace("../", "");

    let scheme = match scheme {
        Some(s) if !s.is_empty() => s.to_ascii_lowercase(),
        _ => base.scheme().to_string(),
    };

    let (host, explicit_host) = match host {
        Some(h) if !h.is_empty() => (h.to_ascii_lowercase(), true),
        _ => (authority(base)?, false),
    };

    Some(NormalizedLink {
        url: format!("{}://{}{}", scheme, host, path),
        host,
        explicit_host,
    })
}

/// Normalizes a seed (or otherwise absolute) URL into the canonical
/// `scheme://host/path` form used for storage and comparison.
pub fn normalize_seed(url_str: &str) -> UrlResult<String> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let host = authority(&url).ok_or(UrlError::MissingHost)?;

    Ok(format!("{}://{}{}", url.scheme(), host, url.path()))
}

/// Returns the host of a URL including the port when one is present.
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Splits an href into its scheme, host, and remainder, without resolving
/// anything. Mirrors a scheme/netloc/path decomposition: the scheme is only
/// recognized when a valid scheme name precedes the first `:`, and a host is
/// only present after a literal `//`.
fn split_href(href: &str) -> (Option<&str>, Option<&str>, &str) {
    let mut scheme = None;
    let mut rest = href;

    if let Some(idx) = href.find(':') {
        let candidate = &href[..idx];
        let valid = !candidate.is_empty()
            && candidate.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            scheme = Some(candidate);
            rest = &href[idx + 1..];
        }
    }

    let mut host = None;
    if let Some(stripped) = rest.strip_prefix("//") {
        let end = stripped
            .find(|c| c == '/' || c == '?' || c == '#')
            .unwrap_or(stripped.len());
        host = Some(&stripped[..end]);
        rest = &stripped[end..];
    }

    (scheme, host, rest)
}
