//! End-to-end pipeline: extract, process, validate
//!
//! The extractor and the bibliography processor run independently; the
//! validator consumes both outputs. A missing bibliography file is a fatal
//! precondition failure; unreadable documents are logged and skipped.

use std::path::{Path, PathBuf};

use serde::Serialize;

use refcheck_domain::{Citation, ValidationReport, ValidationResult};

use crate::bibliography::{Bibliography, BibliographyProcessor, BibliographyStats};
use crate::error::Result;
use crate::extract::{CitationExtractor, ExtractionStats};
use crate::validate::ReferenceValidator;

/// Everything one pipeline run produces, immutable once returned.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationRun {
    pub citations: Vec<Citation>,
    pub extraction_stats: ExtractionStats,
    pub bibliography: Bibliography,
    pub bibliography_stats: BibliographyStats,
    pub results: Vec<ValidationResult>,
    pub report: ValidationReport,
}

/// Run the full pipeline over a document corpus and a bibliography file.
pub fn run_pipeline(documents: &[PathBuf], bibliography_path: &Path) -> Result<ValidationRun> {
    let extractor = CitationExtractor::new();
    let extraction = extractor.extract_from_files(documents);

    let processor = BibliographyProcessor::new();
    let processed = processor.load_from_file(bibliography_path)?;

    let validator = ReferenceValidator::new(&extraction.citations, &processed.bibliography);
    let outcome = validator.validate_all();

    Ok(ValidationRun {
        citations: extraction.citations,
        extraction_stats: extraction.stats,
        bibliography: processed.bibliography,
        bibliography_stats: processed.stats,
        results: outcome.results,
        report: outcome.report,
    })
}
