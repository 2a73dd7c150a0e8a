//! Domain types shared across the refcheck suite
//!
//! This crate provides the canonical data model for citation validation:
//! - Citation: an in-text citation with its normalized payload and location
//! - BibliographyEntry: a parsed reference-list entry with validation status
//! - ValidationResult / ValidationReport: per-citation findings and the
//!   aggregate cross-reference report
//!
//! All types serialize with serde; the JSON field names are the contract
//! consumed by downstream collaborators (report renderers, orchestrators).

pub mod bibliography;
pub mod citation;
pub mod report;

pub use bibliography::*;
pub use citation::*;
pub use report::*;
