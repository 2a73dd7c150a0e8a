//! Text normalization
//!
//! Citation and bibliography text arrives with mixed unicode forms, curly
//! dashes, markdown markers, and uneven spacing. Everything downstream
//! (splitting, indexing, similarity) works on the normalized forms produced
//! here.

pub mod authors;

use unicode_normalization::UnicodeNormalization;

/// Normalize unicode composition, dashes, and spacing. Keeps case and
/// diacritics.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let dashed: String = composed
        .chars()
        .map(|c| match c {
            '–' | '—' | '−' => '-',
            c => c,
        })
        .collect();
    collapse_whitespace(&dashed).trim().to_string()
}

/// Remove markdown emphasis markers (`_`, `*`).
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| *c != '_' && *c != '*').collect()
}

/// Strip diacritics by NFKD decomposition, keeping the ASCII base characters.
pub fn fold_diacritics(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// Canonical form for comparisons and index keys: normalized, diacritics
/// folded, lowercased.
pub fn comparison_form(text: &str) -> String {
    fold_diacritics(&normalize_text(text)).trim().to_lowercase()
}

/// Collapse runs of whitespace into a single space.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}
