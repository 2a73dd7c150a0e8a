//! Citation extraction integration tests

use proptest::prelude::*;

use refcheck_core::domain::{CitationType, NormalizedCitation};
use refcheck_core::{CitationExtractor, ExtractionStats};

// === Standard citations ===

#[test]
fn test_extract_parenthetical_citation() {
    let extractor = CitationExtractor::new();
    let outcome =
        extractor.extract_from_text("intro.md", "Research shows (Smith, 2023) that things happen.");

    assert_eq!(outcome.citations.len(), 1);
    let citation = &outcome.citations[0];
    assert_eq!(citation.raw_text, "(Smith, 2023)");
    assert_eq!(citation.citation_type, CitationType::Parenthetical);
    assert_eq!(
        citation.normalized,
        NormalizedCitation::AuthorYear {
            authors: vec!["Smith".to_string()],
            year: Some("2023".to_string()),
        }
    );
    assert_eq!(citation.confidence, 1.0);
}

#[test]
fn test_column_is_one_based_match_start() {
    let extractor = CitationExtractor::new();
    let line = "Research shows (Smith, 2023) that things happen.";
    let outcome = extractor.extract_from_text("intro.md", line);

    let citation = &outcome.citations[0];
    assert_eq!(citation.location.line, 1);
    assert_eq!(citation.location.column as usize, line.find('(').unwrap() + 1);
    assert!(citation.location.context.contains(&citation.raw_text));
}

#[test]
fn test_extract_two_author_citation() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("intro.md", "Both (Smith & Jones, 2023) agreed.");

    assert_eq!(outcome.citations.len(), 1);
    assert_eq!(
        outcome.citations[0].normalized,
        NormalizedCitation::AuthorYear {
            authors: vec!["Smith".to_string(), "Jones".to_string()],
            year: Some("2023".to_string()),
        }
    );
}

#[test]
fn test_extract_et_al_citation_keeps_marker() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("intro.md", "Evidence (Smith et al., 2023) shows.");

    assert_eq!(outcome.citations.len(), 1);
    let citation = &outcome.citations[0];
    assert!(citation.normalized.has_et_al());
    assert_eq!(
        citation.normalized.authors().unwrap(),
        &["Smith".to_string(), "et al.".to_string()]
    );
}

// === Narrative citations ===

#[test]
fn test_extract_narrative_citation() {
    let extractor = CitationExtractor::new();
    let outcome =
        extractor.extract_from_text("intro.md", "Earlier, Smith (2023) demonstrated this.");

    assert_eq!(outcome.citations.len(), 1);
    assert_eq!(outcome.citations[0].citation_type, CitationType::Narrative);
    assert_eq!(outcome.citations[0].raw_text, "Smith (2023)");
}

#[test]
fn test_extract_narrative_two_authors() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("intro.md", "Smith and Jones (2023) argued this.");

    let narrative: Vec<_> = outcome
        .citations
        .iter()
        .filter(|c| c.raw_text.starts_with("Smith and"))
        .collect();
    assert_eq!(narrative.len(), 1);
    assert_eq!(
        narrative[0].normalized.authors().unwrap(),
        &["Smith".to_string(), "Jones".to_string()]
    );
}

// === Locators ===

#[test]
fn test_extract_citation_with_pages() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("intro.md", "Stated plainly (Smith, 2023, p. 15).");

    assert_eq!(outcome.citations.len(), 1);
    let citation = &outcome.citations[0];
    assert_eq!(citation.citation_type, CitationType::WithPages);
    match &citation.normalized {
        NormalizedCitation::WithPages { pages, year, .. } => {
            assert_eq!(pages, "15");
            assert_eq!(year.as_deref(), Some("2023"));
        }
        other => panic!("expected WithPages payload, got {other:?}"),
    }
}

#[test]
fn test_quoted_citation_coexists_with_page_citation() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text(
        "intro.md",
        "\"A direct quote\" (Smith, 2023, p. 15) ends here.",
    );

    let types: Vec<CitationType> = outcome.citations.iter().map(|c| c.citation_type).collect();
    assert!(types.contains(&CitationType::Quoted));
    assert!(types.contains(&CitationType::WithPages));
}

// === Complex and special forms ===

#[test]
fn test_extract_multiple_citations() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("intro.md", "Several (Smith, 2023; Jones, 2022).");

    assert_eq!(outcome.citations.len(), 1);
    let citation = &outcome.citations[0];
    assert_eq!(citation.citation_type, CitationType::MultipleCitations);
    match &citation.normalized {
        NormalizedCitation::Multiple { multiple } => {
            assert_eq!(multiple.len(), 2);
            assert_eq!(multiple[0].authors, vec!["Smith".to_string()]);
            assert_eq!(multiple[0].year.as_deref(), Some("2023"));
            assert_eq!(multiple[1].authors, vec!["Jones".to_string()]);
            assert_eq!(multiple[1].year.as_deref(), Some("2022"));
        }
        other => panic!("expected Multiple payload, got {other:?}"),
    }
    // no top-level year: 1.0 - 0.3
    assert!((citation.confidence - 0.7).abs() < 1e-9);
}

#[test]
fn test_extract_secondary_citation() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text(
        "intro.md",
        "Older work (Thompson, 1995, as cited in Smith, 2023) remains relevant.",
    );

    assert_eq!(outcome.citations.len(), 1);
    let citation = &outcome.citations[0];
    assert_eq!(citation.citation_type, CitationType::Secondary);
    assert_eq!(
        citation.normalized,
        NormalizedCitation::Secondary {
            original_author: "Thompson".to_string(),
            original_year: "1995".to_string(),
            cited_in_author: "Smith".to_string(),
            cited_in_year: "2023".to_string(),
        }
    );
    // neither a direct author list nor a direct year
    assert!((citation.confidence - 0.4).abs() < 1e-9);
}

#[test]
fn test_extract_personal_communication() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text(
        "intro.md",
        "Confirmed (J. Smith, personal communication, January 15, 2023) recently.",
    );

    assert_eq!(outcome.citations.len(), 1);
    let citation = &outcome.citations[0];
    assert_eq!(
        citation.citation_type,
        CitationType::PersonalCommunication
    );
    assert_eq!(
        citation.normalized.authors().unwrap(),
        &["J. Smith".to_string()]
    );
    assert_eq!(citation.normalized.year(), Some("2023"));
}

#[test]
fn test_diacritics_folded_in_authors() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("intro.md", "Estudios (García y Pérez, 2021).");

    assert_eq!(outcome.citations.len(), 1);
    assert_eq!(
        outcome.citations[0].normalized.authors().unwrap(),
        &["Garcia".to_string(), "Perez".to_string()]
    );
}

// === Determinism and identity ===

#[test]
fn test_reextraction_yields_identical_ids() {
    let extractor = CitationExtractor::new();
    let text = "One (Smith, 2023). Two (Jones, 2022, p. 4). Three by Lee (2021) here.";

    let first: Vec<String> = extractor
        .extract_from_text("doc.md", text)
        .citations
        .iter()
        .map(|c| c.id.clone())
        .collect();
    let second: Vec<String> = extractor
        .extract_from_text("doc.md", text)
        .citations
        .iter()
        .map(|c| c.id.clone())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_ids_are_unique_within_a_document() {
    let extractor = CitationExtractor::new();
    let text = "A (Smith, 2023) and again (Smith, 2023) and (Smith, 2023).";
    let outcome = extractor.extract_from_text("doc.md", text);

    assert_eq!(outcome.citations.len(), 3);
    let mut ids: Vec<&str> = outcome.citations.iter().map(|c| c.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_citations_ordered_by_line_and_column() {
    let extractor = CitationExtractor::new();
    let text = "Late on line (Smith, 2023, p. 9) then (Jones, 2022).\nNext line (Lee, 2021).";
    let outcome = extractor.extract_from_text("doc.md", text);

    let positions: Vec<(u32, u32)> = outcome
        .citations
        .iter()
        .map(|c| (c.location.line, c.location.column))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

// === Corpus handling ===

#[test]
fn test_unreadable_file_is_skipped() {
    let extractor = CitationExtractor::new();
    let outcome =
        extractor.extract_from_files(&[std::path::PathBuf::from("/nonexistent/missing.md")]);

    assert!(outcome.citations.is_empty());
    assert_eq!(outcome.stats.files_processed, 0);
}

#[test]
fn test_corpus_merges_sorted_by_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.md");
    let second = dir.path().join("b.md");
    std::fs::write(&first, "Alpha (Smith, 2023).").unwrap();
    std::fs::write(&second, "Beta (Jones, 2022).").unwrap();

    let extractor = CitationExtractor::new();
    // pass in reverse order; output must still be sorted by file
    let outcome = extractor.extract_from_files(&[second, first]);

    assert_eq!(outcome.citations.len(), 2);
    assert!(outcome.citations[0].location.file.ends_with("a.md"));
    assert!(outcome.citations[1].location.file.ends_with("b.md"));
    assert_eq!(outcome.stats.files_processed, 2);
}

#[test]
fn test_stats_count_by_type() {
    let extractor = CitationExtractor::new();
    let text = "A (Smith, 2023). B (Jones, 2022). Narrative by Lee (2021).";
    let outcome = extractor.extract_from_text("doc.md", text);

    assert_eq!(
        outcome.stats.citations_by_type[&CitationType::Parenthetical],
        2
    );
    assert_eq!(outcome.stats.citations_by_type[&CitationType::Narrative], 1);
    assert_eq!(outcome.stats.citations_found, 3);
}

#[test]
fn test_stats_merge_identity() {
    let extractor = CitationExtractor::new();
    let outcome = extractor.extract_from_text("doc.md", "One (Smith, 2023).");

    let merged = outcome.stats.clone().merge(ExtractionStats::default());
    assert_eq!(merged, outcome.stats);
}

// === Properties ===

proptest! {
    #[test]
    fn prop_confidence_stays_in_bounds(text in ".{0,200}") {
        let extractor = CitationExtractor::new();
        let outcome = extractor.extract_from_text("fuzz.md", &text);
        for citation in &outcome.citations {
            prop_assert!(citation.confidence >= 0.1);
            prop_assert!(citation.confidence <= 1.0);
            prop_assert!(citation.location.column >= 1);
        }
    }

    #[test]
    fn prop_raw_text_always_in_context(text in "[ -~]{0,120}") {
        let extractor = CitationExtractor::new();
        let outcome = extractor.extract_from_text("fuzz.md", &text);
        for citation in &outcome.citations {
            prop_assert!(citation.location.context.contains(&citation.raw_text));
        }
    }
}
