//! Pattern catalog for APA-7 citations and bibliography entries
//!
//! Pure data plus compilation: each citation rule couples a regex source with
//! a declared [`CaptureShape`] describing which capture group is the
//! author(s), year, locator, and so on. Extraction and parsing dispatch on
//! the declared shape, never on substring sniffing of the matched text, so
//! adding a rule never touches extractor control flow.

pub mod apa;
pub mod bibliography_rules;
pub mod citation_rules;

pub use bibliography_rules::{
    detect_entry_type, grammar_for, BibliographyGrammar, DetectionRule, TypeSignal,
    BIBLIOGRAPHY_GRAMMARS, DETECTION_ORDER,
};
pub use citation_rules::{
    catalog, compile_catalog, compile_rule, CaptureShape, CitationRule, CompiledRule,
    PatternError, RuleCategory, CITATION_RULES,
};
