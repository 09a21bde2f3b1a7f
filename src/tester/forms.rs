//! HTML form extraction

use reqwest::Method;
use scraper::{Html, Selector};

/// A single named input inside a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,

    /// Submit buttons keep their original value during injection.
    pub is_submit: bool,
}

/// A form parsed from a page, scoped to the page it was found on.
#[derive(Debug, Clone)]
pub struct Form {
    /// Human-readable identifier used in findings: the form's `id` attribute,
    /// else its `name`, else its 1-based position on the page.
    pub label: String,

    /// Raw `action` attribute; resolved against the page URL at submit time.
    pub action: Option<String>,

    /// Submission method from the `method` attribute, defaulting to GET.
    pub method: Method,

    /// Named inputs in document order.
    pub fields: Vec<Field>,
}

/// Extracts all forms from an HTML document.
///
/// Inputs without a `name` attribute never reach the server and are skipped;
/// missing `value` attributes become empty strings.
pub fn parse_forms(html: &str) -> Vec<Form> {
    let document = Html::parse_document(html);
    let mut forms = Vec::new();

    let Ok(form_selector) = Selector::parse("form") else {
        return forms;
    };
    let Ok(input_selector) = Selector::parse("input") else {
        return forms;
    };

    for (index, element) in document.select(&form_selector).enumerate() {
        let label = element
            .value()
            .attr("id")
            .or_else(|| element.value().attr("name"))
            .map(str::to_string)
            .unwrap_or_else(|| (index + 1).to_string());

        let action = element.value().attr("action").map(str::to_string);

        let method = match element.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => Method::POST,
            _ => Method::GET,
        };

        let mut fields = Vec::new();
        for input in element.select(&input_selector) {
            let Some(name) = input.value().attr("name").filter(|n| !n.is_empty()) else {
                continue;
            };

            fields.push(Field {
                name: name.to_string(),
                value: input.value().attr("value").unwrap_or("").to_string(),
                is_submit: input
                    .value()
                    .attr("type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("submit")),
            });
        }

        forms.push(Form {
            label,
            action,
            method,
            fields,
        });
    }

    forms
}
