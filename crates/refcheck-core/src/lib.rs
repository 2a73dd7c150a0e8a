//! refcheck-core: citation and bibliography cross-reference engine
//!
//! This library provides pure Rust implementations of:
//! - Citation extraction from line-oriented document text
//! - Bibliography parsing with type detection and lookup indices
//! - Fuzzy author matching and APA format validation
//! - Cross-reference validation and report aggregation
//!
//! Control flow is a strict pipeline: the extractor and the bibliography
//! processor run independently, then the validator consumes both outputs.

pub mod bibliography;
pub mod error;
pub mod extract;
pub mod matching;
pub mod pipeline;
pub mod text;
pub mod validate;

mod ids;

// Re-export main types for convenience
pub use bibliography::{
    Bibliography, BibliographyIndex, BibliographyOutcome, BibliographyProcessor, BibliographyStats,
};
pub use error::{Error, Result};
pub use extract::{CitationExtractor, ExtractionOutcome, ExtractionStats};
pub use matching::{author_set_similarity, string_similarity};
pub use pipeline::{run_pipeline, ValidationRun};
pub use validate::{ReferenceValidator, ValidationOutcome};

pub use refcheck_domain as domain;
pub use refcheck_patterns as patterns;
