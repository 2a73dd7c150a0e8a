//! APA format-check patterns
//!
//! Compiled once; used by the reference validator for citation and
//! bibliography format checks.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A parenthetical citation is the parenthesis and nothing else.
    pub static ref FULL_PARENTHESES: Regex = Regex::new(r"^\([^)]+\)$").unwrap();
    /// Four digits with an optional disambiguating letter, at the start.
    pub static ref YEAR_FORMAT: Regex = Regex::new(r"^\d{4}[a-z]?").unwrap();
    /// `et al.` with its period.
    pub static ref ET_AL_PERIOD: Regex = Regex::new(r"et al\.").unwrap();
    /// Page locator: `p. 15` or `pp. 15-20`.
    pub static ref PAGE_FORMAT: Regex = Regex::new(r"pp?\.\s*\d+").unwrap();
    /// Bibliography entries end with a period.
    pub static ref ENDING_PERIOD: Regex = Regex::new(r"\.$").unwrap();
    /// The publication year sits in parentheses.
    pub static ref YEAR_PARENTHESES: Regex = Regex::new(r"\(\d{4}[a-z]?\)").unwrap();
}
