//! Bibliography entry grammars and type detection
//!
//! One grammar per entry type with an ordered field list, plus the ordered
//! type-detection decision list. Detection order is a contract: a line can
//! satisfy more than one type's signal, and the first match wins.

use lazy_static::lazy_static;
use regex::Regex;

use refcheck_domain::EntryType;

/// Declarative grammar for one entry type
#[derive(Debug)]
pub struct BibliographyGrammar {
    pub entry_type: EntryType,
    pub pattern: &'static str,
    /// Capture groups in order
    pub fields: &'static [&'static str],
    pub example: &'static str,
}

/// Entry grammars, APA 7th edition.
pub const BIBLIOGRAPHY_GRAMMARS: &[BibliographyGrammar] = &[
    BibliographyGrammar {
        entry_type: EntryType::JournalArticle,
        pattern: r"^(.+?)\s+\((\d{4}[a-z]?)\)\.\s+(.+?)\.\s+_?([^_]+?)_?,\s*_?(\d+)_?\((\d+)\),\s*(\d+[–-]\d+)",
        fields: &[
            "authors", "year", "title", "journal", "volume", "issue", "pages",
        ],
        example: "Smith, J., & Jones, M. (2023). Article title. Journal Name, 15(3), 123-145.",
    },
    BibliographyGrammar {
        entry_type: EntryType::Book,
        pattern: r"^(.+?)\s+\((\d{4}[a-z]?)\)\.\s+_(.+?)_\.\s+(.+?)\.$",
        fields: &["authors", "year", "title", "publisher"],
        example: "Smith, J. (2023). _Book title_. Publisher Name.",
    },
    BibliographyGrammar {
        entry_type: EntryType::BookChapter,
        pattern: r"^(.+?)\s+\((\d{4}[a-z]?)\)\.\s+(.+?)\.\s+(?:In|En)\s+(.+?)\s+\((?:Ed|Eds|Comp)\.\),\s+_(.+?)_\s+\(pp?\.\s*(\d+[–-]\d+)\)\.\s+(.+?)\.$",
        fields: &[
            "authors",
            "year",
            "chapter_title",
            "editors",
            "book_title",
            "pages",
            "publisher",
        ],
        example: "Smith, J. (2023). Chapter title. In M. Jones (Ed.), _Book title_ (pp. 123-145). Publisher.",
    },
    BibliographyGrammar {
        entry_type: EntryType::WebResource,
        pattern: r"^(.+?)\s+\((\d{4}[a-z]?(?:,\s*[A-Za-z]+\s*\d{1,2})?)\)\.\s+(.+?)\.\s+(?:Retrieved|Recuperado)\s+(?:from|de)\s+(.+)$",
        fields: &["authors", "date", "title", "url"],
        example: "Smith, J. (2023, January 15). Web page title. Retrieved from https://example.com",
    },
    BibliographyGrammar {
        entry_type: EntryType::Dissertation,
        pattern: r"^(.+?)\s+\((\d{4}[a-z]?)\)\.\s+_(.+?)_\s+\[([^\]]+)\]\.\s+(.+?)\.$",
        fields: &["author", "year", "title", "type", "institution"],
        example: "Smith, J. (2023). _Title of dissertation_ [Doctoral dissertation]. University Name.",
    },
];

/// Grammar lookup by entry type.
pub fn grammar_for(entry_type: EntryType) -> Option<&'static BibliographyGrammar> {
    BIBLIOGRAPHY_GRAMMARS
        .iter()
        .find(|g| g.entry_type == entry_type)
}

/// One signal in the type-detection decision list
#[derive(Clone, Copy, Debug)]
pub enum TypeSignal {
    /// Any of these substrings present in the lowercased entry
    LowercaseMarkers(&'static [&'static str]),
    /// Any of these substrings present verbatim
    Markers(&'static [&'static str]),
    /// `(issue), pages` tail, e.g. `(3), 123-145`
    VolumeIssuePages,
    /// `, volume(issue)` form, e.g. `, 15(3)`
    CommaVolumeIssue,
    /// Italic `_title_` span without an `(\d+)` issue number anywhere
    ItalicTitleWithoutIssue,
}

/// One step of the ordered decision list
#[derive(Debug)]
pub struct DetectionRule {
    pub entry_type: EntryType,
    pub signal: TypeSignal,
}

/// Ordered type-detection rules; first match wins.
pub const DETECTION_ORDER: &[DetectionRule] = &[
    DetectionRule {
        entry_type: EntryType::Dissertation,
        signal: TypeSignal::LowercaseMarkers(&["[doctoral dissertation]", "[tesis doctoral]"]),
    },
    DetectionRule {
        entry_type: EntryType::Thesis,
        signal: TypeSignal::LowercaseMarkers(&["[master", "[tesis de"]),
    },
    DetectionRule {
        entry_type: EntryType::JournalArticle,
        signal: TypeSignal::VolumeIssuePages,
    },
    DetectionRule {
        entry_type: EntryType::JournalArticle,
        signal: TypeSignal::CommaVolumeIssue,
    },
    DetectionRule {
        entry_type: EntryType::BookChapter,
        signal: TypeSignal::Markers(&[" In ", " En "]),
    },
    DetectionRule {
        entry_type: EntryType::WebResource,
        signal: TypeSignal::LowercaseMarkers(&["retrieved from", "recuperado de"]),
    },
    DetectionRule {
        entry_type: EntryType::Book,
        signal: TypeSignal::ItalicTitleWithoutIssue,
    },
];

lazy_static! {
    static ref VOLUME_ISSUE_PAGES: Regex = Regex::new(r"\(\d+\),\s*\d+-\d+").unwrap();
    static ref COMMA_VOLUME_ISSUE: Regex = Regex::new(r",\s*\d+\(\d+\)").unwrap();
    static ref ITALIC_SPAN: Regex = Regex::new(r"_[^_]+_").unwrap();
    // 1-3 digits: an issue number, never the 4-digit year parenthetical
    static ref ISSUE_PARENS: Regex = Regex::new(r"\(\d{1,3}\)").unwrap();
}

lazy_static! {
    /// Everything before the first opening parenthesis: the author block.
    pub static ref LEADING_AUTHORS: Regex = Regex::new(r"^([^(]+)\s*\(").unwrap();
    /// Publication year in parentheses, optional disambiguating letter.
    pub static ref YEAR_IN_PARENS: Regex = Regex::new(r"\((\d{4}[a-z]?)\)").unwrap();
    /// Fallback: year after a comma, terminated by comma or period.
    pub static ref YEAR_AFTER_COMMA: Regex = Regex::new(r",\s*(\d{4}[a-z]?)[,.]").unwrap();
    /// Splits an entry at the year parenthetical.
    pub static ref AFTER_YEAR: Regex = Regex::new(r"\(\d{4}[a-z]?\)\.?\s*").unwrap();
    /// Title sentence: text up to a period followed by an uppercase letter,
    /// an italic marker, or end of entry.
    pub static ref TITLE_SENTENCE: Regex = Regex::new(r"^([^.]+?)\.(?:\s+[A-Z_]|\s*$)").unwrap();
    /// Italic title at the start of the post-year text.
    pub static ref ITALIC_TITLE_LEAD: Regex = Regex::new(r"^_([^_]+)_").unwrap();
    /// Italic book title directly after the year parenthetical.
    pub static ref BOOK_TITLE_AFTER_YEAR: Regex =
        Regex::new(r"\(\d{4}[a-z]?\)\.?\s*_([^_]+)_").unwrap();
    /// Journal tail: `. Journal Name, Volume(Issue), pages`.
    pub static ref JOURNAL_TAIL: Regex =
        Regex::new(r"\.([^,]+),\s*(\d+)(?:\((\d+)\))?,\s*(\d+[-–]\d+)").unwrap();
    /// DOI, bare or as a resolver URL.
    pub static ref DOI: Regex = Regex::new(r"(?i)(?:doi:|https://doi\.org/)([^\s]+)").unwrap();
    /// First parenthesized span: the date of a web resource.
    pub static ref FIRST_PARENS: Regex = Regex::new(r"\(([^)]+)\)").unwrap();
    /// Web resource URL after the retrieval phrase.
    pub static ref RETRIEVED_URL: Regex =
        Regex::new(r"(?i)(?:Retrieved from|Recuperado de)\s+(.+)$").unwrap();
    /// Any bare URL.
    pub static ref ANY_URL: Regex = Regex::new(r"https?://[^\s]+").unwrap();
    /// Structured author: `Last, I. I.` with diacritics allowed.
    pub static ref STRUCTURED_AUTHOR: Regex = Regex::new(
        r"([A-ZÁÉÍÓÚÑa-záéíóúñ\-']+(?:\s+[A-ZÁÉÍÓÚÑa-záéíóúñ\-']+)*),\s*([A-Z](?:\.\s*[A-Z]\.?)*)"
    )
    .unwrap();
    /// `, &` / `, y` before the final author of a list.
    pub static ref LAST_AUTHOR_CONNECTOR: Regex = Regex::new(r",\s*(&|y)\s*").unwrap();
}

/// Detect the entry type of a bibliography line. First matching rule in
/// [`DETECTION_ORDER`] wins.
pub fn detect_entry_type(text: &str) -> EntryType {
    let lowered = text.to_lowercase();
    for rule in DETECTION_ORDER {
        let hit = match rule.signal {
            TypeSignal::LowercaseMarkers(markers) => markers.iter().any(|m| lowered.contains(m)),
            TypeSignal::Markers(markers) => markers.iter().any(|m| text.contains(m)),
            TypeSignal::VolumeIssuePages => VOLUME_ISSUE_PAGES.is_match(text),
            TypeSignal::CommaVolumeIssue => COMMA_VOLUME_ISSUE.is_match(text),
            TypeSignal::ItalicTitleWithoutIssue => {
                ITALIC_SPAN.is_match(text) && !ISSUE_PARENS.is_match(text)
            }
        };
        if hit {
            return rule.entry_type;
        }
    }
    EntryType::Unknown
}
