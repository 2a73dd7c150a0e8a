//! Fuzzy author matching
//!
//! Pairwise similarity blends Jaro-Winkler and normalized Levenshtein over
//! comparison-form strings. Author-set similarity follows the citation's
//! shape: an `et al.` citation only needs its first author to line up, a
//! full author list is scored by the fraction of citation authors that find
//! a close bibliography counterpart.

use strsim::{jaro_winkler, normalized_levenshtein};

use refcheck_domain::EntryAuthor;

use crate::text::authors::ET_AL;
use crate::text::comparison_form;

/// Pairwise similarity above this counts an author as matched.
pub const AUTHOR_PAIR_THRESHOLD: f64 = 0.8;

/// Minimum author-set similarity for the full-bibliography fallback scan.
pub const FALLBACK_SCAN_THRESHOLD: f64 = 0.7;

const JARO_WINKLER_WEIGHT: f64 = 0.6;
const LEVENSHTEIN_WEIGHT: f64 = 0.4;

/// Similarity of two strings in [0.0, 1.0], case- and accent-insensitive.
/// A string compared with itself scores 1.0.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let norm_a = comparison_form(a);
    let norm_b = comparison_form(b);

    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }

    jaro_winkler(&norm_a, &norm_b) * JARO_WINKLER_WEIGHT
        + normalized_levenshtein(&norm_a, &norm_b) * LEVENSHTEIN_WEIGHT
}

/// Similarity between a citation's author list and a bibliography entry's
/// authors.
///
/// With an `et al.` marker only the first author pair is compared. Otherwise
/// the score is the fraction of citation authors whose best bibliography
/// counterpart exceeds [`AUTHOR_PAIR_THRESHOLD`].
pub fn author_set_similarity(citation_authors: &[String], entry_authors: &[EntryAuthor]) -> f64 {
    if citation_authors.is_empty() || entry_authors.is_empty() {
        return 0.0;
    }

    let has_et_al = citation_authors
        .iter()
        .any(|author| author.to_lowercase().contains("et al"));

    let cited: Vec<&String> = citation_authors
        .iter()
        .filter(|author| author.as_str() != ET_AL)
        .collect();
    let listed: Vec<&str> = entry_authors
        .iter()
        .map(|author| author.last_name.as_str())
        .collect();

    if cited.is_empty() || listed.is_empty() {
        return 0.0;
    }

    if has_et_al {
        return string_similarity(cited[0], listed[0]);
    }

    let matched = cited
        .iter()
        .filter(|cited_author| {
            listed
                .iter()
                .map(|listed_author| string_similarity(cited_author, listed_author))
                .fold(0.0_f64, f64::max)
                > AUTHOR_PAIR_THRESHOLD
        })
        .count();

    matched as f64 / cited.len() as f64
}
