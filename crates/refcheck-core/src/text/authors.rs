//! Author, year, and page normalization for in-text citations

use lazy_static::lazy_static;
use regex::Regex;

use super::{fold_diacritics, normalize_text};

/// The `et al.` pseudo-author appended when a rule matched the marker.
pub const ET_AL: &str = "et al.";

/// Sentinel year for works not yet published.
pub const IN_PRESS: &str = "in press";

lazy_static! {
    static ref ET_AL_SPLIT: Regex = Regex::new(r"\s+et\s+al\.").unwrap();
    // Tried in order; the first separator present splits the whole list
    static ref SEPARATORS: [Regex; 4] = [
        Regex::new(r"\s*&\s*").unwrap(),
        Regex::new(r"\s+and\s+").unwrap(),
        Regex::new(r"\s+y\s+").unwrap(),
        Regex::new(r"\s*[,;]\s*").unwrap(),
    ];
    static ref IN_PRESS_MARKER: Regex = Regex::new(r"(?i)(in\s+press|en\s+prensa)").unwrap();
    static ref YEAR_RUN: Regex = Regex::new(r"\d{4}[a-z]?").unwrap();
    static ref PAGE_RUN: Regex = Regex::new(r"\d+(?:-\d+)?").unwrap();
}

/// Normalize a single captured author name.
pub fn clean_author(author_text: &str) -> String {
    fold_diacritics(&normalize_text(author_text))
}

/// Split a captured author block into individual names.
///
/// An `et al.` marker short-circuits the split: only the first author is
/// retained, with the marker as a trailing pseudo-author.
pub fn split_citation_authors(author_text: &str) -> Vec<String> {
    let cleaned = clean_author(author_text);

    if cleaned.contains(ET_AL) {
        let first = ET_AL_SPLIT
            .split(&cleaned)
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        let mut authors = Vec::new();
        if !first.is_empty() {
            authors.push(first);
        }
        authors.push(ET_AL.to_string());
        return authors;
    }

    for separator in SEPARATORS.iter() {
        if separator.is_match(&cleaned) {
            return separator
                .split(&cleaned)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    let single = cleaned.trim();
    if single.is_empty() {
        Vec::new()
    } else {
        vec![single.to_string()]
    }
}

/// Extract and normalize a year: the first 4-digit run with an optional
/// disambiguating letter, or the `in press` sentinel.
pub fn extract_year(year_text: &str) -> Option<String> {
    let trimmed = year_text.trim();

    if IN_PRESS_MARKER.is_match(trimmed) {
        return Some(IN_PRESS.to_string());
    }

    YEAR_RUN.find(trimmed).map(|m| m.as_str().to_string())
}

/// Extract a page locator: the first `\d+(-\d+)?` run.
pub fn extract_pages(page_text: &str) -> Option<String> {
    let cleaned = normalize_text(page_text);
    PAGE_RUN.find(&cleaned).map(|m| m.as_str().to_string())
}
