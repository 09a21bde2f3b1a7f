//! Form injection testing
//!
//! The tester takes a fetched page, injects each configured payload into
//! every form's non-submit fields, submits through the shared session, and
//! classifies the page from the responses. The first signature match wins and
//! short-circuits all remaining payloads and forms for the page.

mod forms;
mod signatures;

pub use forms::{parse_forms, Field, Form};
pub use signatures::{match_signature, SQL_ERROR_SIGNATURES};

use crate::crawler::Fetcher;
use crate::progress::TestResult;
use crate::{Result, SweepError};
use url::Url;

/// Tests every form on a page for reflected SQL injection.
pub struct FormTester<'a> {
    fetcher: &'a Fetcher,
    payloads: &'a [String],
}

impl<'a> FormTester<'a> {
    pub fn new(fetcher: &'a Fetcher, payloads: &'a [String]) -> Self {
        Self { fetcher, payloads }
    }

    /// Produces exactly one result for the page.
    ///
    /// Payloads are tried in their configured order against each form in
    /// document order. A signature match stops all further submissions for
    /// the page; if nothing matches (including the no-forms case) the page is
    /// safe. Submission failures propagate to the caller, which records the
    /// page as a failure.
    pub async fn test_page(&self, page_url: &Url, body: &str) -> Result<TestResult> {
        let forms = parse_forms(body);

        if forms.is_empty() {
            tracing::debug!("No forms on {}", page_url);
            return Ok(TestResult::safe());
        }

        tracing::debug!("Testing {} form(s) on {}", forms.len(), page_url);

        for form in &forms {
            let action = resolve_action(page_url, form.action.as_deref())?;

            for payload in self.payloads {
                let params = injected_params(form, payload);
                let response_body = self
                    .fetcher
                    .submit(form.method.clone(), &action, &params)
                    .await?;

                if let Some(label) = match_signature(&response_body) {
                    let finding = format!("{} on form {}", label, form.label);
                    tracing::warn!("{}: {}", page_url, finding);
                    return Ok(TestResult::vulnerable(finding));
                }
            }
        }

        Ok(TestResult::safe())
    }
}

/// Builds the submitted field map for one payload: non-submit values get the
/// payload appended, submit values are kept as-is.
fn injected_params(form: &Form, payload: &str) -> Vec<(String, String)> {
    form.fields
        .iter()
        .map(|field| {
            let value = if field.is_submit {
                field.value.clone()
            } else {
                format!("{}{}", field.value, payload)
            };
            (field.name.clone(), value)
        })
        .collect()
}

/// Resolves a form's action against the page it was found on. A missing or
/// empty action resubmits to the page itself.
fn resolve_action(page_url: &Url, action: Option<&str>) -> Result<Url> {
    match action {
        Some(action) if !action.is_empty() => {
            page_url.join(action).map_err(SweepError::UrlParse)
        }
        _ => Ok(page_url.clone()),
    }
}
