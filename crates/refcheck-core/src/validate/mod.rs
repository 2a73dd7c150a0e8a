//! Cross-reference validation
//!
//! Consumes the extractor's citations and the processed bibliography,
//! producing one [`ValidationResult`] per citation and an aggregate
//! [`ValidationReport`]. Matching dispatches on the citation's normalized
//! shape; format findings and match findings fold into a per-citation
//! status.

pub mod format;

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use refcheck_domain::{
    Citation, DuplicateCitation, FormatViolation, IssueSeverity, IssueType, MissingReference,
    NormalizedCitation, ReportStatistics, SearchedFor, ValidationIssue, ValidationReport,
    ValidationResult, ValidationStatus,
};

use crate::bibliography::Bibliography;
use crate::matching::{author_set_similarity, string_similarity, AUTHOR_PAIR_THRESHOLD};
use crate::text::authors::ET_AL;
use crate::text::comparison_form;

pub use format::{validate_bibliography_format, validate_citation_format};

/// A resolved match below this confidence gets a warning.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// An author-year key cited more often than this is reported.
pub const DUPLICATE_CITATION_THRESHOLD: usize = 5;

/// Confidence assigned when every member of a multi-work citation resolves.
pub const MULTIPLE_MATCH_CONFIDENCE: f64 = 0.9;

/// Sentinel match id for a fully-resolved multi-work citation.
pub const MULTIPLE_VALID_SENTINEL: &str = "multiple_valid";

lazy_static! {
    static ref YEAR_DIGITS: Regex = Regex::new(r"\d{4}").unwrap();
}

/// Per-citation results plus the aggregate report.
#[derive(Clone, Debug)]
pub struct ValidationOutcome {
    pub results: Vec<ValidationResult>,
    pub report: ValidationReport,
}

/// Validates citations against a processed bibliography.
pub struct ReferenceValidator<'a> {
    citations: &'a [Citation],
    bibliography: &'a Bibliography,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(citations: &'a [Citation], bibliography: &'a Bibliography) -> Self {
        Self {
            citations,
            bibliography,
        }
    }

    /// Validate every citation and assemble the report.
    pub fn validate_all(&self) -> ValidationOutcome {
        let mut results = Vec::with_capacity(self.citations.len());
        let mut missing_bibliography = Vec::new();
        let mut format_violations = Vec::new();
        let mut citation_counts: BTreeMap<String, usize> = BTreeMap::new();

        for citation in self.citations {
            let (_, format_issues) = validate_citation_format(citation);
            let (matched, match_confidence) = self.match_citation(citation);

            let mut issues: Vec<ValidationIssue> = format_issues
                .iter()
                .map(|message| {
                    ValidationIssue::new(IssueType::Format, IssueSeverity::Warning, message.clone())
                })
                .collect();
            let mut suggestions = Vec::new();

            if matched.is_none() {
                issues.push(ValidationIssue::new(
                    IssueType::MissingBibliography,
                    IssueSeverity::Error,
                    "No matching bibliography entry found",
                ));
                missing_bibliography.push(MissingReference {
                    citation: citation.clone(),
                    searched_for: SearchedFor {
                        authors: citation
                            .normalized
                            .authors()
                            .map(<[String]>::to_vec)
                            .unwrap_or_default(),
                        year: citation.normalized.year().unwrap_or("").to_string(),
                    },
                });
                suggestions = self.suggest_matches(citation);
            } else if match_confidence < LOW_CONFIDENCE_THRESHOLD {
                issues.push(ValidationIssue::new(
                    IssueType::LowConfidenceMatch,
                    IssueSeverity::Warning,
                    format!("Low confidence match ({match_confidence:.2})"),
                ));
            }

            let status = if issues.iter().any(|i| i.severity == IssueSeverity::Error) {
                ValidationStatus::Invalid
            } else if issues.iter().any(|i| i.severity == IssueSeverity::Warning) {
                ValidationStatus::Warning
            } else {
                ValidationStatus::Valid
            };

            let confidence = if matched.is_some() {
                match_confidence
            } else {
                0.0
            };

            results.push(ValidationResult {
                citation_id: citation.id.clone(),
                status,
                issues,
                suggestions,
                matched_bibliography: matched,
                confidence,
            });

            if !format_issues.is_empty() {
                format_violations.push(FormatViolation {
                    citation: citation.clone(),
                    issues: format_issues,
                });
            }

            *citation_counts.entry(citation_key(citation)).or_insert(0) += 1;
        }

        let bibliography_with_issues = self
            .bibliography
            .entries
            .iter()
            .filter(|entry| !validate_bibliography_format(entry).1.is_empty())
            .count();

        let duplicate_citations: Vec<DuplicateCitation> = citation_counts
            .iter()
            .filter(|(_, &count)| count > DUPLICATE_CITATION_THRESHOLD)
            .map(|(key, &count)| DuplicateCitation {
                citation_key: key.clone(),
                count,
                suggestion: "Consider using narrative citations for variety".to_string(),
            })
            .collect();

        let mut most_cited: Option<(String, usize)> = None;
        for (key, &count) in &citation_counts {
            if most_cited
                .as_ref()
                .map(|(_, best)| count > *best)
                .unwrap_or(true)
            {
                most_cited = Some((key.clone(), count));
            }
        }

        let valid_citations = results
            .iter()
            .filter(|r| r.status == ValidationStatus::Valid)
            .count();
        let invalid_citations = results
            .iter()
            .filter(|r| r.status == ValidationStatus::Invalid)
            .count();
        let warnings = results
            .iter()
            .filter(|r| r.status == ValidationStatus::Warning)
            .count();

        let report = ValidationReport {
            total_citations: self.citations.len(),
            valid_citations,
            invalid_citations,
            warnings,
            missing_bibliography,
            format_violations,
            duplicate_citations,
            statistics: ReportStatistics {
                total_bibliography_entries: self.bibliography.len(),
                bibliography_with_issues,
                unique_citations: citation_counts.len(),
                most_cited,
            },
        };

        tracing::info!(
            "validation complete: {} valid, {} invalid, {} warnings",
            report.valid_citations,
            report.invalid_citations,
            report.warnings
        );

        ValidationOutcome { results, report }
    }

    /// Resolve a citation to a bibliography entry, dispatching on its
    /// normalized shape. Returns the entry id (or sentinel) and the match
    /// confidence.
    pub fn match_citation(&self, citation: &Citation) -> (Option<String>, f64) {
        match &citation.normalized {
            NormalizedCitation::Multiple { multiple } => {
                let all_found = multiple.iter().all(|sub| {
                    sub.year
                        .as_deref()
                        .map(|year| self.find_single_match(&sub.authors, year).0.is_some())
                        .unwrap_or(false)
                });
                if all_found {
                    (
                        Some(MULTIPLE_VALID_SENTINEL.to_string()),
                        MULTIPLE_MATCH_CONFIDENCE,
                    )
                } else {
                    (None, 0.0)
                }
            }
            NormalizedCitation::Secondary {
                cited_in_author,
                cited_in_year,
                ..
            } => {
                if cited_in_author.is_empty() || cited_in_year.is_empty() {
                    return (None, 0.0);
                }
                self.find_single_match(std::slice::from_ref(cited_in_author), cited_in_year)
            }
            _ => {
                let authors = citation.normalized.authors().unwrap_or(&[]);
                let Some(year) = citation.normalized.year() else {
                    return (None, 0.0);
                };
                if authors.is_empty() {
                    return (None, 0.0);
                }
                self.find_single_match(authors, year)
            }
        }
    }

    /// Exact composite-key lookup first, then a full scan requiring exact
    /// year equality and similarity above the fallback threshold.
    fn find_single_match(&self, authors: &[String], year: &str) -> (Option<String>, f64) {
        let mut best_match: Option<String> = None;
        let mut best_confidence = 0.0_f64;

        for author in authors {
            if author == ET_AL {
                continue;
            }
            let key = format!("{}_{}", comparison_form(author), year);
            if let Some(entry_ids) = self.bibliography.index.by_author_year.get(&key) {
                for entry_id in entry_ids {
                    let Some(entry) = self.bibliography.entry(entry_id) else {
                        continue;
                    };
                    let confidence = author_set_similarity(authors, &entry.parsed.authors);
                    if confidence > best_confidence {
                        best_match = Some(entry_id.clone());
                        best_confidence = confidence;
                    }
                }
            }
        }

        if best_match.is_none() {
            for entry in &self.bibliography.entries {
                if entry.parsed.year.as_deref() != Some(year) {
                    continue;
                }
                let confidence = author_set_similarity(authors, &entry.parsed.authors);
                if confidence > best_confidence
                    && confidence > crate::matching::FALLBACK_SCAN_THRESHOLD
                {
                    best_match = Some(entry.id.clone());
                    best_confidence = confidence;
                }
            }
        }

        (best_match, best_confidence)
    }

    /// Suggestions for an unmatched citation: nearby years present in the
    /// index and similar author surnames from the bibliography.
    fn suggest_matches(&self, citation: &Citation) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(year) = citation.normalized.year() {
            if let Some(m) = YEAR_DIGITS.find(year) {
                if let Ok(year_value) = m.as_str().parse::<i32>() {
                    for nearby in [year_value - 1, year_value + 1] {
                        let needle = format!("_{nearby}");
                        if self
                            .bibliography
                            .index
                            .by_author_year
                            .keys()
                            .any(|key| key.contains(&needle))
                        {
                            suggestions.push(format!("Check year {nearby} in bibliography"));
                        }
                    }
                }
            }
        }

        if let Some(authors) = citation.normalized.authors() {
            for author in authors {
                if author == ET_AL {
                    continue;
                }
                for entry in &self.bibliography.entries {
                    for entry_author in &entry.parsed.authors {
                        if string_similarity(author, &entry_author.last_name)
                            > AUTHOR_PAIR_THRESHOLD
                        {
                            suggestions
                                .push(format!("Similar author found: {}", entry_author.last_name));
                            break;
                        }
                    }
                }
            }
        }

        suggestions
    }
}

/// Author-year key used for duplicate detection and statistics.
fn citation_key(citation: &Citation) -> String {
    let first_author = citation
        .normalized
        .authors()
        .and_then(|authors| authors.first())
        .map(String::as_str)
        .unwrap_or("Unknown");
    let year = citation.normalized.year().unwrap_or("Unknown");
    format!("{first_author}_{year}")
}
