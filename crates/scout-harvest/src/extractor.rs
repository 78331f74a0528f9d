//! Email address extraction from free text.

use regex::Regex;
use scout_core::EmailSet;
use std::sync::OnceLock;

/// Local part, `@`, dotted domain, alphabetic TLD of two or more letters.
const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex"))
}

/// Find every email-shaped substring in `text`.
///
/// Matching is purely syntactic and case is preserved, so `a@x.CO` and
/// `a@x.co` are two different entries.
#[must_use]
pub fn extract_emails(text: &str) -> EmailSet {
    email_regex()
        .find_iter(text)
        .map(|found| found.as_str())
        .collect()
}
