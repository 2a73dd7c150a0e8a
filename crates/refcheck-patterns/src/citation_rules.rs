//! Citation rule catalog
//!
//! Thirteen APA-7 rules in five categories. Each rule declares its capture
//! semantics via [`CaptureShape`]: which 1-based group holds the author(s),
//! the year, and any locator. The extractor interprets shapes uniformly.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use refcheck_domain::CitationType;

/// Catalog category a rule belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCategory {
    Standard,
    Narrative,
    WithPages,
    Complex,
    Special,
}

/// Declared capture-group semantics of a rule.
///
/// Group indices are 1-based (`0` is the whole match). The extractor
/// dispatches exhaustively on this enum; no rule is interpreted by
/// re-inspecting its matched text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureShape {
    /// One author group and one year group
    AuthorYear { author: usize, year: usize },
    /// Like `AuthorYear`, but the rule itself matched an `et al.` marker;
    /// the marker is preserved as a trailing pseudo-author
    AuthorYearEtAl { author: usize, year: usize },
    /// Two separate author groups and a year group
    TwoAuthorsYear { first: usize, second: usize, year: usize },
    /// Author list, year, and a page locator
    AuthorYearPages { author: usize, year: usize, pages: usize },
    /// Author list, year, and a paragraph locator
    AuthorYearParagraph { author: usize, year: usize, paragraph: usize },
    /// A semicolon-separated list of author/year pairs
    CitationList { list: usize },
    /// Original work plus the citing work (`as cited in`)
    SecondarySource {
        original_author: usize,
        original_year: usize,
        citing_author: usize,
        citing_year: usize,
    },
    /// Personal communication: author initialed name plus a prose date
    PersonalCommunication { author: usize, date: usize },
}

/// One declarative citation rule
#[derive(Debug)]
pub struct CitationRule {
    pub name: &'static str,
    pub category: RuleCategory,
    pub citation_type: CitationType,
    pub shape: CaptureShape,
    pub pattern: &'static str,
    pub example: &'static str,
}

/// The full rule catalog, in match-precedence order.
///
/// Order is significant: when two rules match the same span, the earlier
/// rule's parse wins during extractor dedup.
pub const CITATION_RULES: &[CitationRule] = &[
    // === standard ===
    CitationRule {
        name: "single_author",
        category: RuleCategory::Standard,
        citation_type: CitationType::Parenthetical,
        shape: CaptureShape::AuthorYear { author: 1, year: 2 },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*),?\s*(\d{4}[a-z]?)\)",
        example: "(Smith, 2023)",
    },
    CitationRule {
        name: "two_authors",
        category: RuleCategory::Standard,
        citation_type: CitationType::Parenthetical,
        shape: CaptureShape::TwoAuthorsYear {
            first: 1,
            second: 2,
            year: 3,
        },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*)\s*[&y]\s*([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*),?\s*(\d{4}[a-z]?)\)",
        example: "(Smith & Jones, 2023)",
    },
    CitationRule {
        name: "et_al",
        category: RuleCategory::Standard,
        citation_type: CitationType::Parenthetical,
        shape: CaptureShape::AuthorYearEtAl { author: 1, year: 2 },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*)\s+et\s+al\.,?\s*(\d{4}[a-z]?)\)",
        example: "(Smith et al., 2023)",
    },
    // === narrative ===
    CitationRule {
        name: "narrative_single",
        category: RuleCategory::Narrative,
        citation_type: CitationType::Narrative,
        shape: CaptureShape::AuthorYear { author: 1, year: 2 },
        pattern: r"([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*)\s+\((\d{4}[a-z]?)\)",
        example: "Smith (2023)",
    },
    CitationRule {
        name: "narrative_two",
        category: RuleCategory::Narrative,
        citation_type: CitationType::Narrative,
        shape: CaptureShape::TwoAuthorsYear {
            first: 1,
            second: 2,
            year: 3,
        },
        pattern: r"([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*)\s+(?:and|y|&)\s+([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*)\s+\((\d{4}[a-z]?)\)",
        example: "Smith and Jones (2023)",
    },
    CitationRule {
        name: "narrative_et_al",
        category: RuleCategory::Narrative,
        citation_type: CitationType::Narrative,
        shape: CaptureShape::AuthorYearEtAl { author: 1, year: 2 },
        pattern: r"([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*)\s+et\s+al\.\s+\((\d{4}[a-z]?)\)",
        example: "Smith et al. (2023)",
    },
    // === with pages ===
    CitationRule {
        name: "with_page",
        category: RuleCategory::WithPages,
        citation_type: CitationType::WithPages,
        shape: CaptureShape::AuthorYearPages {
            author: 1,
            year: 2,
            pages: 3,
        },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-',\s&]+),?\s*(\d{4}[a-z]?),?\s*pp?\.\s*(\d+(?:-\d+)?)\)",
        example: "(Smith, 2023, p. 15)",
    },
    CitationRule {
        name: "with_paragraph",
        category: RuleCategory::WithPages,
        citation_type: CitationType::WithParagraph,
        shape: CaptureShape::AuthorYearParagraph {
            author: 1,
            year: 2,
            paragraph: 3,
        },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-',\s&]+),?\s*(\d{4}[a-z]?),?\s*(?:para|párr?)\.\s*(\d+)\)",
        example: "(Smith, 2023, para. 4)",
    },
    // === complex ===
    CitationRule {
        name: "multiple_works_same_author",
        category: RuleCategory::Complex,
        citation_type: CitationType::MultipleYears,
        shape: CaptureShape::AuthorYear { author: 1, year: 2 },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*),?\s*(\d{4}[a-z]?(?:,\s*\d{4}[a-z]?)+)\)",
        example: "(Smith, 2021, 2023)",
    },
    CitationRule {
        name: "multiple_citations",
        category: RuleCategory::Complex,
        citation_type: CitationType::MultipleCitations,
        shape: CaptureShape::CitationList { list: 1 },
        pattern: r"\(([^;]+;\s*[^)]+)\)",
        example: "(Smith, 2023; Jones, 2022)",
    },
    CitationRule {
        name: "quoted_with_citation",
        category: RuleCategory::Complex,
        citation_type: CitationType::Quoted,
        shape: CaptureShape::AuthorYearPages {
            author: 1,
            year: 2,
            pages: 3,
        },
        pattern: r#""[^"]+"\s*\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-',\s&]+),?\s*(\d{4}[a-z]?),?\s*pp?\.\s*(\d+(?:-\d+)?)\)"#,
        example: "\"text\" (Smith, 2023, p. 15)",
    },
    // === special ===
    CitationRule {
        name: "personal_communication",
        category: RuleCategory::Special,
        citation_type: CitationType::PersonalCommunication,
        shape: CaptureShape::PersonalCommunication { author: 1, date: 2 },
        pattern: r"\(([A-Z]\.\s*[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+),?\s*(?:personal\s+communication|comunicación\s+personal),?\s*([A-Za-z]+\s+\d{1,2},?\s*\d{4})\)",
        example: "(J. Smith, personal communication, January 15, 2023)",
    },
    CitationRule {
        name: "secondary_source",
        category: RuleCategory::Special,
        citation_type: CitationType::Secondary,
        shape: CaptureShape::SecondarySource {
            original_author: 1,
            original_year: 2,
            citing_author: 3,
            citing_year: 4,
        },
        pattern: r"\(([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*),?\s*(\d{4}[a-z]?),?\s*(?:as\s+cited\s+in|citado\s+en)\s+([A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+(?:\s+[A-Z][A-Za-zÁÉÍÓÚáéíóúñÑ\-']+)*),?\s*(\d{4}[a-z]?)\)",
        example: "(Smith, 2020, as cited in Jones, 2023)",
    },
];

/// A rule with its compiled regex
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: &'static CitationRule,
    pub regex: Regex,
}

/// A rule whose pattern failed to compile. Non-fatal: the rule is skipped
/// for the run.
#[derive(Debug, Error)]
#[error("invalid pattern for citation rule `{name}`: {source}")]
pub struct PatternError {
    pub name: String,
    #[source]
    pub source: regex::Error,
}

/// Compile a single rule.
pub fn compile_rule(rule: &'static CitationRule) -> Result<CompiledRule, PatternError> {
    let regex = Regex::new(rule.pattern).map_err(|source| PatternError {
        name: rule.name.to_string(),
        source,
    })?;
    Ok(CompiledRule { rule, regex })
}

/// Compile the whole catalog, logging and skipping any rule that fails.
pub fn compile_catalog() -> Vec<CompiledRule> {
    CITATION_RULES
        .iter()
        .filter_map(|rule| match compile_rule(rule) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                tracing::warn!("skipping citation rule: {err}");
                None
            }
        })
        .collect()
}

lazy_static! {
    static ref CATALOG: Vec<CompiledRule> = compile_catalog();
}

/// The compiled catalog, in precedence order.
pub fn catalog() -> &'static [CompiledRule] {
    &CATALOG
}
