//! In-text citation model

use serde::{Deserialize, Serialize};

/// The recognized in-text citation shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    /// Reference fully inside parentheses: `(Smith, 2023)`
    Parenthetical,
    /// Author as running text, year parenthesized: `Smith (2023)`
    Narrative,
    /// Parenthetical with page locator: `(Smith, 2023, p. 15)`
    WithPages,
    /// Parenthetical with paragraph locator: `(Smith, 2023, para. 4)`
    WithParagraph,
    /// Same author, several years: `(Smith, 2021, 2023)`
    MultipleYears,
    /// Several works in one parenthesis: `(Smith, 2023; Jones, 2022)`
    MultipleCitations,
    /// Direct quote followed by a cited locator
    Quoted,
    /// `(J. Smith, personal communication, January 15, 2023)`
    PersonalCommunication,
    /// Work known only through another work: `(Smith, 2020, as cited in Jones, 2023)`
    Secondary,
}

impl CitationType {
    /// The serialized (snake_case) name, for stats keys and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationType::Parenthetical => "parenthetical",
            CitationType::Narrative => "narrative",
            CitationType::WithPages => "with_pages",
            CitationType::WithParagraph => "with_paragraph",
            CitationType::MultipleYears => "multiple_years",
            CitationType::MultipleCitations => "multiple_citations",
            CitationType::Quoted => "quoted",
            CitationType::PersonalCommunication => "personal_communication",
            CitationType::Secondary => "secondary",
        }
    }
}

/// One member of a multi-work citation, e.g. `Smith, 2023` inside
/// `(Smith, 2023; Jones, 2022)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubCitation {
    pub authors: Vec<String>,
    pub year: Option<String>,
}

/// Type-specific payload of a citation.
///
/// Serialized untagged so the JSON carries exactly the field set of the
/// citation shape (`authors`/`year`, locator fields, `multiple` sub-citations,
/// or the secondary-source pairs). Variants are ordered most-specific-first
/// for deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedCitation {
    /// `as cited in` form; only the citing (outer) pair is resolvable.
    Secondary {
        original_author: String,
        original_year: String,
        cited_in_author: String,
        cited_in_year: String,
    },
    /// Several independent works in one parenthesis.
    Multiple { multiple: Vec<SubCitation> },
    /// Author/year plus a paragraph locator. The locator is required: the
    /// matching rules only fire when the paragraph group is present, and the
    /// field keeps the untagged variants distinguishable.
    WithParagraph {
        authors: Vec<String>,
        year: Option<String>,
        paragraph: String,
    },
    /// Author/year plus a page locator (required, as for paragraphs).
    WithPages {
        authors: Vec<String>,
        year: Option<String>,
        pages: String,
    },
    /// Plain author/year pair.
    AuthorYear {
        authors: Vec<String>,
        year: Option<String>,
    },
}

impl NormalizedCitation {
    /// The author list, when this shape carries one directly.
    pub fn authors(&self) -> Option<&[String]> {
        match self {
            NormalizedCitation::AuthorYear { authors, .. }
            | NormalizedCitation::WithPages { authors, .. }
            | NormalizedCitation::WithParagraph { authors, .. } => Some(authors),
            _ => None,
        }
    }

    /// The year, when this shape carries one directly.
    pub fn year(&self) -> Option<&str> {
        match self {
            NormalizedCitation::AuthorYear { year, .. }
            | NormalizedCitation::WithPages { year, .. }
            | NormalizedCitation::WithParagraph { year, .. } => year.as_deref(),
            _ => None,
        }
    }

    /// Whether the author list carries the `et al.` pseudo-author marker.
    pub fn has_et_al(&self) -> bool {
        self.authors()
            .map(|a| a.iter().any(|name| name.to_lowercase().contains("et al")))
            .unwrap_or(false)
    }
}

/// Where a citation was found in the source corpus
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based physical line number
    pub line: u32,
    /// 1-based character offset of the match start within the line
    pub column: u32,
    /// The match plus up to 50 characters of surrounding text on each side
    pub context: String,
}

/// A single in-text citation found in a document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Content-derived identifier, stable across runs on unchanged input
    pub id: String,
    /// The exact matched substring
    pub raw_text: String,
    pub normalized: NormalizedCitation,
    pub location: SourceLocation,
    #[serde(rename = "type")]
    pub citation_type: CitationType,
    /// Extraction confidence in [0.1, 1.0]
    pub confidence: f64,
}

impl Citation {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
