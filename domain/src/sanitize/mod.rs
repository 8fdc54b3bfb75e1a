//! Best-effort textual repair of free-form model output into parseable JSON
//!
//! Generative models wrap their "JSON" in prose, markdown fences and
//! comments, use typographic quotes, echo schema placeholders, and leave
//! trailing commas. This module turns such output into a parse candidate.
//! It is pure domain logic — no I/O, just text transformation.
//!
//! The pipeline, in order:
//!
//! 1. Strip fenced code blocks (```json and bare ```)
//! 2. Strip `//` and `/* */` comments (string-literal aware)
//! 3. Normalize typographic quotes to ASCII
//! 4. Strip non-printable characters
//! 5. Extract the first balanced `{...}` substring — fail if none exists
//! 6. Rewrite placeholder leaks (`[...]`, bare `...`, bare type-name
//!    tokens) to safe literal defaults
//! 7. Collapse whitespace and remove trailing commas
//!
//! The output is a best-effort candidate: the caller must still attempt
//! to parse it and treat a parse error as a failure of the whole attempt.

mod extract;
mod repair;

pub use extract::first_balanced_object;

use thiserror::Error;

/// Sanitization failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// The text contains no balanced `{...}` substring at all.
    #[error("no JSON object found in model output")]
    NoJsonFound,
}

/// Repair raw model output into a JSON parse candidate.
///
/// Returns the extracted, repaired candidate, or [`SanitizeError::NoJsonFound`]
/// when the text holds no balanced object. The candidate is not guaranteed
/// to parse.
///
/// # Example
///
/// ```
/// use macrolens_domain::sanitize::sanitize;
///
/// let raw = "Here you go:\n```json\n{\"calories\": 450,}\n```";
/// assert_eq!(sanitize(raw).unwrap(), "{\"calories\": 450}");
/// ```
pub fn sanitize(raw: &str) -> Result<String, SanitizeError> {
    let text = repair::strip_code_fences(raw);
    let text = repair::strip_comments(&text);
    let text = repair::normalize_quotes(&text);
    let text = repair::strip_unprintable(&text);

    let candidate = first_balanced_object(&text).ok_or(SanitizeError::NoJsonFound)?;

    let candidate = repair::rewrite_placeholders(candidate);
    Ok(repair::tidy(&candidate))
}
