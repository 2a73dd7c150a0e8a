//! Error taxonomy for the pipeline
//!
//! Only missing required inputs are fatal. Everything else degrades to data
//! in the output: skipped files, skipped rules, per-entry error lists.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input file is absent. Fatal for the owning phase.
    #[error("required input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// A file could not be read. Callers processing a corpus log and skip.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A catalog rule failed to compile. The rule is skipped for the run.
    #[error(transparent)]
    Pattern(#[from] refcheck_patterns::PatternError),
}

pub type Result<T> = std::result::Result<T, Error>;
