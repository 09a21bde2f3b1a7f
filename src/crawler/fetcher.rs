//! HTTP fetcher
//!
//! One persistent `reqwest` client, with its cookie store enabled, lives for
//! the whole crawl run so that session state survives across page fetches and
//! form submissions. An optional [`SessionHook`] runs before every request to
//! refresh credentials on session-sensitive targets.

use crate::{Result, SweepError};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Fetch failure classification. The controller treats both variants
/// identically: a terminal failure result for the URL, no retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} unreachable: {message}")]
    Unreachable { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    BadStatus { url: String, status: u16 },
}

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    /// The normalized URL the page was requested as.
    pub url: String,

    /// Raw response body.
    pub body: String,
}

/// Pre-request hook for session-sensitive targets.
///
/// Invoked before each page fetch and before each form submission. The hook
/// may issue requests through the shared client to re-establish cookies or
/// other session state; any site-specific login flow lives behind this trait
/// rather than in the crawl core.
#[async_trait]
pub trait SessionHook: Send + Sync {
    async fn refresh(&self, client: &Client) -> anyhow::Result<()>;
}

/// Page fetcher owning the shared HTTP session.
pub struct Fetcher {
    client: Client,
    hook: Option<Arc<dyn SessionHook>>,
}

impl Fetcher {
    /// Builds a fetcher with a persistent cookie-keeping client.
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        hook: Option<Arc<dyn SessionHook>>,
    ) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, hook })
    }

    /// The shared HTTP client, exposed for session hooks in tests and
    /// embedders.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches a page.
    ///
    /// A transport-level failure maps to [`FetchError::Unreachable`]; any
    /// non-success HTTP status maps to [`FetchError::BadStatus`].
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        self.run_hook().await?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| unreachable_error(url, e))?;

        Ok(Page {
            url: url.to_string(),
            body,
        })
    }

    /// Submits a form through the shared session and returns the response
    /// body. GET forms send the fields as query parameters, anything else as
    /// a form body.
    ///
    /// Unlike page fetches, a non-success status is not an error here:
    /// database error pages usually arrive with a 5xx status, and the body is
    /// what gets scanned.
    pub async fn submit(
        &self,
        method: Method,
        action: &Url,
        params: &[(String, String)],
    ) -> Result<String> {
        self.run_hook().await?;

        tracing::trace!("{} {} with {} field(s)", method, action, params.len());

        let request = if method == Method::GET {
            self.client.get(action.clone()).query(params)
        } else {
            self.client.request(method, action.clone()).form(params)
        };

        let response = request
            .send()
            .await
            .map_err(|e| unreachable_error(action.as_str(), e))?;

        response
            .text()
            .await
            .map_err(|e| unreachable_error(action.as_str(), e))
    }

    async fn run_hook(&self) -> Result<()> {
        if let Some(hook) = &self.hook {
            hook.refresh(&self.client).await.map_err(SweepError::Hook)?;
        }
        Ok(())
    }
}

fn unreachable_error(url: &str, error: reqwest::Error) -> SweepError {
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed ({})", error)
    } else {
        error.to_string()
    };

    FetchError::Unreachable {
        url: url.to_string(),
        message,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fetcher() {
        let fetcher = Fetcher::new("sqlsweep-test/0.1", Duration::from_secs(5), None);
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_unreachable_display_references_url() {
        let error = FetchError::Unreachable {
            url: "http://example.com/x".to_string(),
            message: "connection failed".to_string(),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("http://example.com/x"));
        assert!(rendered.contains("unreachable"));
    }

    #[test]
    fn test_bad_status_display() {
        let error = FetchError::BadStatus {
            url: "http://example.com/x".to_string(),
            status: 404,
        };
        assert_eq!(error.to_string(), "http://example.com/x returned HTTP 404");
    }
}
