//! Best-effort company and position guesses, handed to the model as hints.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

pub const DEFAULT_POSITION: &str = "Job Application";
pub const DEFAULT_COMPANY: &str = "Company";

/// One position-title rule: a case-insensitive anchor phrase whose first capture
/// group holds the title.
struct TitleRule {
    name: &'static str,
    pattern: Regex,
}

/// Checked in this order; the first rule that yields a title wins, wherever its
/// match sits in the text.
const TITLE_PATTERNS: [(&str, &str); 5] = [
    ("job title", r"(?i)Job Title[:\s]+(.+)"),
    ("position", r"(?i)Position[:\s]+(.+)"),
    ("we're hiring", r"(?i)We're hiring a[n]?\s+(.+?)\."),
    ("we are looking for", r"(?i)We are looking for a[n]?\s+(.+?)\."),
    ("join our team", r"(?i)Join our team as a[n]?\s+(.+?)\."),
];

static TITLE_RULES: LazyLock<Vec<TitleRule>> = LazyLock::new(|| {
    TITLE_PATTERNS
        .iter()
        .filter_map(|&(name, pattern)| {
            Regex::new(pattern)
                .ok()
                .map(|pattern| TitleRule { name, pattern })
        })
        .collect()
});

/// Guesses the advertised position from posting text, falling back to `DEFAULT_POSITION`.
///
/// The capture is cut at the first `.` and trimmed; a rule whose capture is empty
/// after that does not count as a match.
pub fn extract_position_title(text: &str) -> String {
    TITLE_RULES
        .iter()
        .find_map(|rule| {
            let captured = rule.pattern.captures(text)?.get(1)?.as_str();
            let title = captured.split('.').next().unwrap_or_default().trim();
            if title.is_empty() {
                None
            } else {
                debug!("Position title matched rule '{}': {}", rule.name, title);
                Some(title.to_string())
            }
        })
        .unwrap_or_else(|| DEFAULT_POSITION.to_string())
}

/// First label of the job URL's host, capitalized: `careers.acme.com` → `Careers`.
pub fn company_from_url(job_url: &str) -> String {
    Url::parse(job_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .and_then(|host| host.split('.').next().map(capitalize))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
