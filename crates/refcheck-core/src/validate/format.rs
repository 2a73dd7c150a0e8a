//! APA format checks for citations and bibliography entries

use refcheck_domain::{BibliographyEntry, Citation, CitationType, EntryType, ValidationStatus};
use refcheck_patterns::apa::{
    ENDING_PERIOD, ET_AL_PERIOD, FULL_PARENTHESES, PAGE_FORMAT, YEAR_FORMAT, YEAR_PARENTHESES,
};

use crate::text::authors::IN_PRESS;

/// Check a citation's text against the APA citation rules.
///
/// Status: no issues ⇒ valid, one or two ⇒ warning, more ⇒ invalid.
pub fn validate_citation_format(citation: &Citation) -> (ValidationStatus, Vec<String>) {
    let mut issues = Vec::new();
    let raw_text = &citation.raw_text;

    match citation.citation_type {
        CitationType::Parenthetical => {
            if !FULL_PARENTHESES.is_match(raw_text) {
                issues.push("Parenthetical citation missing proper parentheses".to_string());
            }
            if raw_text.contains(" and ") {
                issues.push("Use '&' instead of 'and' in parenthetical citations".to_string());
            }
        }
        CitationType::Narrative => {
            if raw_text.contains('&') && !raw_text.contains('(') {
                issues.push("Use 'and' instead of '&' in narrative citations".to_string());
            }
        }
        _ => {}
    }

    if let Some(year) = citation.normalized.year() {
        if !YEAR_FORMAT.is_match(year) && year != IN_PRESS {
            issues.push(format!("Invalid year format: {year}"));
        }
    }

    if raw_text.to_lowercase().contains("et al") && !ET_AL_PERIOD.is_match(raw_text) {
        issues.push("'et al.' should include a period".to_string());
    }

    if (raw_text.contains("p.") || raw_text.contains("pp.")) && !PAGE_FORMAT.is_match(raw_text) {
        issues.push("Page numbers should follow format: p. # or pp. #-#".to_string());
    }

    let status = match issues.len() {
        0 => ValidationStatus::Valid,
        1..=2 => ValidationStatus::Warning,
        _ => ValidationStatus::Invalid,
    };
    (status, issues)
}

/// Check a bibliography entry's text against the APA reference rules,
/// folding in the entry's own parse-time errors.
pub fn validate_bibliography_format(entry: &BibliographyEntry) -> (ValidationStatus, Vec<String>) {
    let mut issues = Vec::new();
    let raw_text = &entry.raw_text;

    if !ENDING_PERIOD.is_match(raw_text) {
        issues.push("Bibliography entry should end with a period".to_string());
    }
    if !YEAR_PARENTHESES.is_match(raw_text) {
        issues.push("Year should be in parentheses: (YYYY)".to_string());
    }
    if matches!(
        entry.entry_type,
        EntryType::Book | EntryType::JournalArticle
    ) && !raw_text.contains('_')
    {
        issues.push(format!(
            "{} titles should be italicized",
            type_label(entry.entry_type)
        ));
    }

    let status = if entry.validation_status == ValidationStatus::Invalid || !entry.errors.is_empty()
    {
        issues.extend(entry.errors.iter().cloned());
        ValidationStatus::Invalid
    } else if !issues.is_empty() {
        ValidationStatus::Warning
    } else {
        ValidationStatus::Valid
    };
    (status, issues)
}

fn type_label(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Book => "Book",
        EntryType::JournalArticle => "Journal Article",
        EntryType::BookChapter => "Book Chapter",
        EntryType::WebResource => "Web Resource",
        EntryType::Dissertation => "Dissertation",
        EntryType::Thesis => "Thesis",
        EntryType::Unknown => "Unknown",
    }
}
