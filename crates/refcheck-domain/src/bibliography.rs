//! Bibliography entry model

use serde::{Deserialize, Serialize};

/// Detected kind of a bibliography entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    JournalArticle,
    Book,
    BookChapter,
    WebResource,
    Dissertation,
    Thesis,
    Unknown,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::JournalArticle => "journal_article",
            EntryType::Book => "book",
            EntryType::BookChapter => "book_chapter",
            EntryType::WebResource => "web_resource",
            EntryType::Dissertation => "dissertation",
            EntryType::Thesis => "thesis",
            EntryType::Unknown => "unknown",
        }
    }
}

/// Outcome of validating a single entry or citation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Warning,
    Invalid,
}

/// One author of a bibliography entry, split into surname and initials
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryAuthor {
    pub last_name: String,
    pub initials: String,
    /// The author as written, e.g. `Smith, J. A.`
    pub full: String,
}

impl EntryAuthor {
    pub fn new(last_name: impl Into<String>, initials: impl Into<String>) -> Self {
        let last_name = last_name.into();
        let initials = initials.into();
        let full = if initials.is_empty() {
            last_name.clone()
        } else {
            format!("{}, {}", last_name, initials)
        };
        Self {
            last_name,
            initials,
            full,
        }
    }
}

/// Structured fields parsed out of an entry.
///
/// Which fields are populated depends on the entry type (journal fields for
/// articles, publisher for books, date/url for web resources); absent fields
/// are omitted from the JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub authors: Vec<EntryAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Full date string for web resources, e.g. `2023, January 15`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single reference-list entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BibliographyEntry {
    /// Content-derived identifier (raw text + line number)
    pub id: String,
    pub raw_text: String,
    /// 1-based line in the bibliography source
    pub line_number: u32,
    pub parsed: ParsedEntry,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub validation_status: ValidationStatus,
    /// Human-readable reasons the entry is incomplete or malformed
    pub errors: Vec<String>,
}

impl BibliographyEntry {
    /// Whether the entry carries all required fields (authors, year, title).
    pub fn is_complete(&self) -> bool {
        !self.parsed.authors.is_empty()
            && self.parsed.year.is_some()
            && self.parsed.title.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_author_full_form() {
        let author = EntryAuthor::new("Smith", "J. A.");
        assert_eq!(author.full, "Smith, J. A.");

        let bare = EntryAuthor::new("UNESCO", "");
        assert_eq!(bare.full, "UNESCO");
    }

    #[test]
    fn test_entry_type_serializes_snake_case() {
        let json = serde_json::to_string(&EntryType::JournalArticle).unwrap();
        assert_eq!(json, "\"journal_article\"");
    }

    #[test]
    fn test_parsed_entry_omits_absent_fields() {
        let parsed = ParsedEntry {
            authors: vec![EntryAuthor::new("Smith", "J.")],
            year: Some("2023".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("\"year\":\"2023\""));
        assert!(!json.contains("journal"));
        assert!(!json.contains("url"));
    }

    #[test]
    fn test_is_complete_requires_all_three() {
        let entry = BibliographyEntry {
            id: "e1".to_string(),
            raw_text: "Smith, J. (2023). Title.".to_string(),
            line_number: 1,
            parsed: ParsedEntry {
                authors: vec![EntryAuthor::new("Smith", "J.")],
                year: Some("2023".to_string()),
                title: None,
                ..Default::default()
            },
            entry_type: EntryType::Unknown,
            validation_status: ValidationStatus::Invalid,
            errors: vec![],
        };
        assert!(!entry.is_complete());
    }
}
