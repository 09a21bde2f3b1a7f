//! Database error signatures
//!
//! Responses to injected form submissions are scanned for these substrings.
//! The list is ordered and the first match wins, so the more specific MySQL
//! phrases sit ahead of the generic SQL Server one.

/// Ordered `(substring, finding label)` pairs checked against lowercased
/// response bodies.
pub const SQL_ERROR_SIGNATURES: &[(&str, &str)] = &[
    ("you have an error in your sql syntax;", "MySQL injection detected"),
    ("warning: mysql", "MySQL injection detected"),
    (
        "unclosed quotation mark after the character string",
        "SQL injection detected",
    ),
    (
        "quoted string not properly terminated",
        "Oracle injection detected",
    ),
];

/// Scans a response body for a database error signature.
///
/// Matching is case-insensitive; returns the finding label of the first
/// signature found, or `None` when the body is clean.
pub fn match_signature(body: &str) -> Option<&'static str> {
    let lowered = body.to_lowercase();

    SQL_ERROR_SIGNATURES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, label)| *label)
}
