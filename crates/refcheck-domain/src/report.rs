//! Validation results and the aggregate cross-reference report

use serde::{Deserialize, Serialize};

use crate::{Citation, ValidationStatus};

/// Severity of a validation finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Style,
    Info,
}

/// Kind of a validation finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// APA formatting problem in the citation text
    Format,
    /// No bibliography entry could be matched
    MissingBibliography,
    /// A match was found but with low confidence
    LowConfidenceMatch,
}

/// A structured finding attached to a validation result.
///
/// Findings are data, not errors: they never abort a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: IssueSeverity,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(issue_type: IssueType, severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
        }
    }
}

/// Validation outcome for a single citation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub citation_id: String,
    pub status: ValidationStatus,
    pub issues: Vec<ValidationIssue>,
    pub suggestions: Vec<String>,
    /// Matched bibliography entry id, or the `multiple_valid` sentinel for a
    /// fully-resolved multi-work citation
    pub matched_bibliography: Option<String>,
    /// Match confidence; 0.0 when unmatched
    pub confidence: f64,
}

/// What the matcher looked for when no entry was found
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchedFor {
    pub authors: Vec<String>,
    pub year: String,
}

/// An unmatched citation together with the author/year pair searched for
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissingReference {
    pub citation: Citation,
    pub searched_for: SearchedFor,
}

/// A citation with APA format problems
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormatViolation {
    pub citation: Citation,
    pub issues: Vec<String>,
}

/// An author-year key cited often enough to stand out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCitation {
    pub citation_key: String,
    pub count: usize,
    pub suggestion: String,
}

/// Corpus-level counters for the report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub total_bibliography_entries: usize,
    pub bibliography_with_issues: usize,
    pub unique_citations: usize,
    /// Most frequent author-year key and its count
    pub most_cited: Option<(String, usize)>,
}

/// Aggregate cross-reference report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_citations: usize,
    pub valid_citations: usize,
    pub invalid_citations: usize,
    pub warnings: usize,
    pub missing_bibliography: Vec<MissingReference>,
    pub format_violations: Vec<FormatViolation>,
    pub duplicate_citations: Vec<DuplicateCitation>,
    pub statistics: ReportStatistics,
}

impl ValidationReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_serialization() {
        let issue = ValidationIssue::new(
            IssueType::MissingBibliography,
            IssueSeverity::Error,
            "No matching bibliography entry found",
        );
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"type\":\"missing_bibliography\""));
        assert!(json.contains("\"severity\":\"error\""));
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = ValidationReport {
            total_citations: 2,
            valid_citations: 1,
            invalid_citations: 1,
            warnings: 0,
            missing_bibliography: vec![],
            format_violations: vec![],
            duplicate_citations: vec![DuplicateCitation {
                citation_key: "Smith_2023".to_string(),
                count: 6,
                suggestion: "Consider using narrative citations for variety".to_string(),
            }],
            statistics: ReportStatistics {
                total_bibliography_entries: 10,
                bibliography_with_issues: 2,
                unique_citations: 2,
                most_cited: Some(("Smith_2023".to_string(), 6)),
            },
        };
        let parsed = ValidationReport::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(report, parsed);
    }
}
