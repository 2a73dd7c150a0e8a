//! Bibliography parsing and indexing
//!
//! Processes bibliography source text line by line: blank lines and `#`
//! headings are skipped, every other line is one entry. Each entry gets a
//! detected type, type-specific parsed fields, a validation status, and a
//! content-derived id. The finished [`Bibliography`] carries three lookup
//! indices for the validator.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use refcheck_domain::{BibliographyEntry, EntryAuthor, EntryType, ParsedEntry, ValidationStatus};
use refcheck_patterns::bibliography_rules::{
    detect_entry_type, AFTER_YEAR, ANY_URL, BOOK_TITLE_AFTER_YEAR, DOI, FIRST_PARENS,
    ITALIC_TITLE_LEAD, JOURNAL_TAIL, LAST_AUTHOR_CONNECTOR, LEADING_AUTHORS, RETRIEVED_URL,
    STRUCTURED_AUTHOR, TITLE_SENTENCE, YEAR_AFTER_COMMA, YEAR_IN_PARENS,
};

use crate::error::{Error, Result};
use crate::ids::content_id;
use crate::text::{comparison_form, normalize_text, strip_markup};

lazy_static! {
    static ref AMPERSAND_SPLIT: Regex = Regex::new(r"\s*&\s*").unwrap();
    static ref YEAR_DIGITS: Regex = Regex::new(r"\d{4}").unwrap();
}

/// Counters for one unit of bibliography work; combined with the associative
/// [`merge`](BibliographyStats::merge).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BibliographyStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub invalid_entries: usize,
    pub entries_by_type: BTreeMap<EntryType, usize>,
}

impl BibliographyStats {
    fn record(&mut self, entry: &BibliographyEntry) {
        self.total_entries += 1;
        if entry.validation_status == ValidationStatus::Valid {
            self.valid_entries += 1;
        } else {
            self.invalid_entries += 1;
        }
        *self.entries_by_type.entry(entry.entry_type).or_insert(0) += 1;
    }

    /// Combine two stats values.
    pub fn merge(mut self, other: Self) -> Self {
        self.total_entries += other.total_entries;
        self.valid_entries += other.valid_entries;
        self.invalid_entries += other.invalid_entries;
        for (entry_type, count) in other.entries_by_type {
            *self.entries_by_type.entry(entry_type).or_insert(0) += count;
        }
        self
    }
}

/// Lookup indices over a bibliography, entry ids as values.
///
/// `by_author` keys are raw last names as written; `by_author_year` keys are
/// `normalized_last_name + "_" + year`, the same normalization the
/// validator's exact lookup applies.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BibliographyIndex {
    pub by_year: BTreeMap<String, Vec<String>>,
    pub by_author: BTreeMap<String, Vec<String>>,
    pub by_author_year: BTreeMap<String, Vec<String>>,
}

/// Parsed bibliography: entries in source order plus lookup indices.
#[derive(Clone, Debug, Serialize)]
pub struct Bibliography {
    pub entries: Vec<BibliographyEntry>,
    pub index: BibliographyIndex,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl Bibliography {
    /// Build the indices over a finished entry list.
    pub fn build(entries: Vec<BibliographyEntry>) -> Self {
        let mut index = BibliographyIndex::default();
        let mut by_id = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            by_id.insert(entry.id.clone(), position);

            let year = entry.parsed.year.as_deref();
            if let Some(year) = year {
                index
                    .by_year
                    .entry(year.to_string())
                    .or_default()
                    .push(entry.id.clone());
            }

            for author in &entry.parsed.authors {
                if author.last_name.is_empty() {
                    continue;
                }
                index
                    .by_author
                    .entry(author.last_name.clone())
                    .or_default()
                    .push(entry.id.clone());

                if let Some(year) = year {
                    let key = format!("{}_{}", comparison_form(&author.last_name), year);
                    index
                        .by_author_year
                        .entry(key)
                        .or_default()
                        .push(entry.id.clone());
                }
            }
        }

        Self {
            entries,
            index,
            by_id,
        }
    }

    pub fn entry(&self, id: &str) -> Option<&BibliographyEntry> {
        self.by_id.get(id).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed bibliography plus its counters.
#[derive(Clone, Debug, Serialize)]
pub struct BibliographyOutcome {
    pub bibliography: Bibliography,
    pub stats: BibliographyStats,
}

/// Parses bibliography source text into structured entries.
#[derive(Default)]
pub struct BibliographyProcessor;

impl BibliographyProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Parse bibliography text: one entry per non-blank, non-heading line.
    pub fn parse_text(&self, text: &str) -> BibliographyOutcome {
        let mut entries = Vec::new();
        let mut stats = BibliographyStats::default();

        for (index, line) in text.lines().enumerate() {
            let line_number = (index + 1) as u32;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(entry) = self.parse_entry(trimmed, line_number) {
                stats.record(&entry);
                entries.push(entry);
            }
        }

        tracing::info!("parsed {} bibliography entries", entries.len());
        BibliographyOutcome {
            bibliography: Bibliography::build(entries),
            stats,
        }
    }

    /// Load and parse a bibliography file. A missing file is fatal for the
    /// phase ([`Error::InputNotFound`]).
    pub fn load_from_file(&self, path: &Path) -> Result<BibliographyOutcome> {
        if !path.exists() {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse_text(&text))
    }

    /// Parse a single entry line. Returns `None` for empty text.
    pub fn parse_entry(&self, line: &str, line_number: u32) -> Option<BibliographyEntry> {
        let entry_text = line.trim();
        if entry_text.is_empty() {
            return None;
        }

        let entry_type = detect_entry_type(entry_text);
        let parsed = match entry_type {
            EntryType::JournalArticle => parse_journal_article(entry_text),
            EntryType::Book => parse_book(entry_text),
            EntryType::WebResource => parse_web_resource(entry_text),
            _ => parse_generic(entry_text),
        };

        let mut errors = Vec::new();
        let mut validation_status = ValidationStatus::Valid;

        if parsed.authors.is_empty() {
            errors.push("Missing authors".to_string());
            validation_status = ValidationStatus::Invalid;
        }
        if parsed.year.is_none() {
            errors.push("Missing publication year".to_string());
            validation_status = ValidationStatus::Invalid;
        }
        if parsed.title.is_none() {
            errors.push("Missing title".to_string());
            validation_status = ValidationStatus::Invalid;
        }
        if !entry_text.ends_with('.') {
            errors.push("Entry should end with a period".to_string());
            if validation_status == ValidationStatus::Valid {
                validation_status = ValidationStatus::Warning;
            }
        }

        if !errors.is_empty() {
            tracing::debug!("entry at line {line_number}: {}", errors.join("; "));
        }

        Some(BibliographyEntry {
            id: content_id(entry_text, &line_number.to_string()),
            raw_text: entry_text.to_string(),
            line_number,
            parsed,
            entry_type,
            validation_status,
            errors,
        })
    }
}

/// Normalize entry text: unicode/spacing/dashes plus markdown markers.
fn normalize_entry_text(text: &str) -> String {
    normalize_text(&strip_markup(text))
}

/// Parse the author block of an entry into structured authors.
fn parse_entry_authors(author_text: &str) -> Vec<EntryAuthor> {
    let cleaned = normalize_entry_text(author_text);
    // ", & Last, I." and ", y Last, I." both mark the final author
    let connected = LAST_AUTHOR_CONNECTOR.replace_all(&cleaned, " & ");

    let mut authors: Vec<EntryAuthor> = STRUCTURED_AUTHOR
        .captures_iter(&connected)
        .map(|caps| EntryAuthor::new(&caps[1], &caps[2]))
        .collect();
    if !authors.is_empty() {
        return authors;
    }

    // Fallback for unstructured author blocks (organizations, bare names)
    for part in AMPERSAND_SPLIT.split(&connected) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((last_name, initials)) = part.split_once(", ") {
            authors.push(EntryAuthor::new(last_name, initials));
        } else {
            authors.push(EntryAuthor::new(part, ""));
        }
    }
    authors
}

/// Publication year: parenthesized first, then the after-comma fallback.
fn extract_entry_year(entry_text: &str) -> Option<String> {
    if let Some(caps) = YEAR_IN_PARENS.captures(entry_text) {
        return Some(caps[1].to_string());
    }
    YEAR_AFTER_COMMA
        .captures(entry_text)
        .map(|caps| caps[1].to_string())
}

/// Title: the sentence after the year parenthetical, or a leading italic
/// span, or everything up to the first period.
fn extract_entry_title(entry_text: &str) -> Option<String> {
    let mut parts = AFTER_YEAR.splitn(entry_text, 2);
    parts.next()?;
    let remaining = parts.next()?;

    if let Some(caps) = TITLE_SENTENCE.captures(remaining) {
        return non_empty(normalize_entry_text(&caps[1]));
    }
    if let Some(caps) = ITALIC_TITLE_LEAD.captures(remaining) {
        return non_empty(normalize_entry_text(&caps[1]));
    }
    let first_sentence = remaining.split('.').next().unwrap_or("");
    non_empty(normalize_entry_text(first_sentence))
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_journal_article(entry_text: &str) -> ParsedEntry {
    let mut parsed = ParsedEntry::default();

    if let Some(caps) = LEADING_AUTHORS.captures(entry_text) {
        parsed.authors = parse_entry_authors(&caps[1]);
    }
    parsed.year = extract_entry_year(entry_text);
    parsed.title = extract_entry_title(entry_text);

    if let Some(caps) = JOURNAL_TAIL.captures(entry_text) {
        parsed.journal = Some(normalize_entry_text(&caps[1]));
        parsed.volume = Some(caps[2].to_string());
        parsed.issue = caps.get(3).map(|m| m.as_str().to_string());
        parsed.pages = caps.get(4).map(|m| m.as_str().replace('–', "-"));
    }
    if let Some(caps) = DOI.captures(entry_text) {
        parsed.doi = Some(caps[1].trim_end_matches('.').to_string());
    }

    parsed
}

fn parse_book(entry_text: &str) -> ParsedEntry {
    let mut parsed = ParsedEntry::default();

    if let Some(caps) = LEADING_AUTHORS.captures(entry_text) {
        parsed.authors = parse_entry_authors(&caps[1]);
    }
    parsed.year = extract_entry_year(entry_text);
    parsed.title = BOOK_TITLE_AFTER_YEAR
        .captures(entry_text)
        .and_then(|caps| non_empty(normalize_entry_text(&caps[1])))
        .or_else(|| extract_entry_title(entry_text));

    // Publisher: whatever follows the title, minus markers and periods
    if let Some(title) = &parsed.title {
        if let Some(position) = entry_text.find(title.as_str()) {
            let after_title = &entry_text[position + title.len()..];
            let cleaned: String = after_title
                .chars()
                .filter(|c| *c != '_' && *c != '.')
                .collect();
            if let Some(publisher) = non_empty(normalize_entry_text(&cleaned)) {
                parsed.publisher = Some(publisher);
            }
        }
    }

    parsed
}

fn parse_web_resource(entry_text: &str) -> ParsedEntry {
    let mut parsed = ParsedEntry::default();

    if let Some(caps) = LEADING_AUTHORS.captures(entry_text) {
        parsed.authors = parse_entry_authors(&caps[1]);
    }
    if let Some(caps) = FIRST_PARENS.captures(entry_text) {
        let date = caps[1].to_string();
        parsed.year = YEAR_DIGITS.find(&date).map(|m| m.as_str().to_string());
        parsed.date = Some(date);
    }
    parsed.title = extract_entry_title(entry_text);

    if let Some(caps) = RETRIEVED_URL.captures(entry_text) {
        parsed.url = Some(caps[1].trim().to_string());
    } else if let Some(m) = ANY_URL.find(entry_text) {
        parsed.url = Some(m.as_str().trim_end_matches('.').to_string());
    }

    parsed
}

/// Fallback for chapters, dissertations, theses, and unknown entries.
fn parse_generic(entry_text: &str) -> ParsedEntry {
    let mut parsed = ParsedEntry::default();

    if entry_text.contains('(') {
        if let Some(before_parens) = entry_text.split('(').next() {
            parsed.authors = parse_entry_authors(before_parens);
        }
    }
    parsed.year = extract_entry_year(entry_text);
    parsed.title = extract_entry_title(entry_text);

    parsed
}
