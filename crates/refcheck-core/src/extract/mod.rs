//! Citation extraction
//!
//! Scans document text line by line against the rule catalog and normalizes
//! every match into a [`Citation`]. Matches are deduplicated per file on
//! `(raw_text, line, column)` — earlier catalog rules win — and the final
//! list is sorted by `(file, line, column)` so output never depends on scan
//! order.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use refcheck_domain::{Citation, CitationType, NormalizedCitation, SourceLocation, SubCitation};
use refcheck_patterns::{catalog, CaptureShape, CompiledRule};

use crate::error::{Error, Result};
use crate::ids::content_id;
use crate::text::authors::{
    clean_author, extract_pages, extract_year, split_citation_authors, ET_AL,
};

/// Confidence deducted for a missing year or missing authors.
pub const MISSING_FIELD_PENALTY: f64 = 0.3;

/// Floor for extraction confidence.
pub const MIN_CONFIDENCE: f64 = 0.1;

/// Characters of context captured on each side of a match.
pub const CONTEXT_RADIUS: usize = 50;

lazy_static! {
    // One member of a semicolon-separated citation list
    static ref SUB_CITATION: Regex = Regex::new(r"^([^,]+),\s*(\d{4}[a-z]?)").unwrap();
    static ref LIST_SPLIT: Regex = Regex::new(r";\s*").unwrap();
}

/// Counters for one unit of extraction work. Combined with [`merge`], which
/// is associative, so per-file stats can be folded in any grouping.
///
/// [`merge`]: ExtractionStats::merge
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub files_processed: usize,
    pub citations_found: usize,
    pub citations_by_type: BTreeMap<CitationType, usize>,
}

impl ExtractionStats {
    fn record(&mut self, citation_type: CitationType) {
        *self.citations_by_type.entry(citation_type).or_insert(0) += 1;
    }

    /// Combine two stats values.
    pub fn merge(mut self, other: Self) -> Self {
        self.files_processed += other.files_processed;
        self.citations_found += other.citations_found;
        for (citation_type, count) in other.citations_by_type {
            *self.citations_by_type.entry(citation_type).or_insert(0) += count;
        }
        self
    }
}

/// Citations extracted from one or more documents, plus counters.
#[derive(Clone, Debug, Serialize)]
pub struct ExtractionOutcome {
    pub citations: Vec<Citation>,
    pub stats: ExtractionStats,
}

/// Extracts and normalizes citations from document text.
pub struct CitationExtractor {
    rules: &'static [CompiledRule],
}

impl Default for CitationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CitationExtractor {
    /// Extractor over the full compiled catalog.
    pub fn new() -> Self {
        Self { rules: catalog() }
    }

    /// Extractor over a custom rule set (tests, partial catalogs).
    pub fn with_rules(rules: &'static [CompiledRule]) -> Self {
        Self { rules }
    }

    /// Extract all citations from one document's text.
    ///
    /// `file` is the label recorded in each citation's location.
    pub fn extract_from_text(&self, file: &str, text: &str) -> ExtractionOutcome {
        let mut citations: Vec<Citation> = Vec::new();
        let mut seen: HashSet<(String, u32, u32)> = HashSet::new();
        let mut stats = ExtractionStats {
            files_processed: 1,
            ..Default::default()
        };

        for compiled in self.rules {
            for (index, line) in text.lines().enumerate() {
                let line_number = (index + 1) as u32;
                for caps in compiled.regex.captures_iter(line) {
                    let Some(matched) = caps.get(0) else { continue };
                    let raw_text = matched.as_str();
                    let column = (line[..matched.start()].chars().count() + 1) as u32;

                    let key = (raw_text.to_string(), line_number, column);
                    if seen.contains(&key) {
                        continue;
                    }
                    seen.insert(key);

                    let normalized = normalize_match(&compiled.rule.shape, &caps);
                    let confidence = confidence_for(&normalized);
                    let context = context_window(line, matched.start(), matched.end());
                    let id = content_id(raw_text, &format!("{file}:{line_number}:{column}"));

                    stats.record(compiled.rule.citation_type);
                    citations.push(Citation {
                        id,
                        raw_text: raw_text.to_string(),
                        normalized,
                        location: SourceLocation {
                            file: file.to_string(),
                            line: line_number,
                            column,
                            context,
                        },
                        citation_type: compiled.rule.citation_type,
                        confidence,
                    });
                }
            }
        }

        citations.sort_by(|a, b| {
            (a.location.line, a.location.column).cmp(&(b.location.line, b.location.column))
        });
        stats.citations_found = citations.len();

        ExtractionOutcome { citations, stats }
    }

    /// Extract from a single file. A missing or unreadable file is an error
    /// here; corpus-level callers log and skip it.
    pub fn extract_from_file(&self, path: &Path) -> Result<ExtractionOutcome> {
        let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_from_text(&path.display().to_string(), &text))
    }

    /// Extract from a document corpus. Unreadable files are logged and
    /// skipped; the merged result is sorted by `(file, line, column)`.
    pub fn extract_from_files(&self, paths: &[PathBuf]) -> ExtractionOutcome {
        let mut citations = Vec::new();
        let mut stats = ExtractionStats::default();

        for path in paths {
            match self.extract_from_file(path) {
                Ok(outcome) => {
                    tracing::debug!(
                        "found {} citations in {}",
                        outcome.citations.len(),
                        path.display()
                    );
                    citations.extend(outcome.citations);
                    stats = stats.merge(outcome.stats);
                }
                Err(err) => {
                    tracing::warn!("skipping document: {err}");
                }
            }
        }

        citations.sort_by(|a, b| {
            (&a.location.file, a.location.line, a.location.column).cmp(&(
                &b.location.file,
                b.location.line,
                b.location.column,
            ))
        });

        tracing::info!(
            "extracted {} citations from {} files",
            citations.len(),
            stats.files_processed
        );
        ExtractionOutcome { citations, stats }
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

/// Build the normalized payload according to the rule's declared shape.
fn normalize_match(shape: &CaptureShape, caps: &Captures<'_>) -> NormalizedCitation {
    match *shape {
        CaptureShape::AuthorYear { author, year } => NormalizedCitation::AuthorYear {
            authors: split_citation_authors(group(caps, author)),
            year: extract_year(group(caps, year)),
        },
        CaptureShape::AuthorYearEtAl { author, year } => {
            let mut authors = Vec::new();
            let first = clean_author(group(caps, author));
            if !first.is_empty() {
                authors.push(first);
            }
            authors.push(ET_AL.to_string());
            NormalizedCitation::AuthorYear {
                authors,
                year: extract_year(group(caps, year)),
            }
        }
        CaptureShape::TwoAuthorsYear {
            first,
            second,
            year,
        } => NormalizedCitation::AuthorYear {
            authors: vec![
                clean_author(group(caps, first)),
                clean_author(group(caps, second)),
            ],
            year: extract_year(group(caps, year)),
        },
        CaptureShape::AuthorYearPages {
            author,
            year,
            pages,
        } => NormalizedCitation::WithPages {
            authors: split_citation_authors(group(caps, author)),
            year: extract_year(group(caps, year)),
            pages: extract_pages(group(caps, pages)).unwrap_or_default(),
        },
        CaptureShape::AuthorYearParagraph {
            author,
            year,
            paragraph,
        } => NormalizedCitation::WithParagraph {
            authors: split_citation_authors(group(caps, author)),
            year: extract_year(group(caps, year)),
            paragraph: group(caps, paragraph).to_string(),
        },
        CaptureShape::CitationList { list } => NormalizedCitation::Multiple {
            multiple: parse_citation_list(group(caps, list)),
        },
        CaptureShape::SecondarySource {
            original_author,
            original_year,
            citing_author,
            citing_year,
        } => NormalizedCitation::Secondary {
            original_author: clean_author(group(caps, original_author)),
            original_year: extract_year(group(caps, original_year)).unwrap_or_default(),
            cited_in_author: clean_author(group(caps, citing_author)),
            cited_in_year: extract_year(group(caps, citing_year)).unwrap_or_default(),
        },
        CaptureShape::PersonalCommunication { author, date } => NormalizedCitation::AuthorYear {
            authors: split_citation_authors(group(caps, author)),
            year: extract_year(group(caps, date)),
        },
    }
}

/// Parse the members of a semicolon-separated citation list. Members that do
/// not look like `authors, year` are skipped.
fn parse_citation_list(list_text: &str) -> Vec<SubCitation> {
    LIST_SPLIT
        .split(list_text)
        .filter_map(|part| {
            let caps = SUB_CITATION.captures(part.trim())?;
            Some(SubCitation {
                authors: split_citation_authors(group(&caps, 1)),
                year: extract_year(group(&caps, 2)),
            })
        })
        .collect()
}

/// Completeness-based confidence, floored at [`MIN_CONFIDENCE`].
fn confidence_for(normalized: &NormalizedCitation) -> f64 {
    let mut confidence = 1.0;

    if normalized.year().is_none() {
        confidence -= MISSING_FIELD_PENALTY;
    }

    let has_multiple = matches!(normalized, NormalizedCitation::Multiple { .. });
    let has_authors = normalized.authors().map(|a| !a.is_empty()).unwrap_or(false);
    if !has_authors && !has_multiple {
        confidence -= MISSING_FIELD_PENALTY;
    }

    confidence.max(MIN_CONFIDENCE)
}

/// The match plus up to [`CONTEXT_RADIUS`] characters on each side,
/// char-boundary safe.
fn context_window(line: &str, start: usize, end: usize) -> String {
    let before: String = line[..start]
        .chars()
        .rev()
        .take(CONTEXT_RADIUS)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    let after: String = line[end..].chars().take(CONTEXT_RADIUS).collect();
    format!("{}{}{}", before, &line[start..end], after)
}
