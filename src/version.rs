use crate::error::Result;
use crate::utils::git;
use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::path::Path;

lazy_static! {
    /// Matches a rendered label at the very end of a string, whatever its hash or date.
    pub static ref TRAILING_LABEL: Regex =
        Regex::new(r"Version [0-9a-fA-F]* \(\d{4}-\d{2}-\d{2}\)$").unwrap();
}

/// The text stamped into the footer: `Version {hash} ({YYYY-MM-DD})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLabel {
    hash: String,
    date: NaiveDate,
}

impl VersionLabel {
    pub fn new(hash: impl Into<String>, date: NaiveDate) -> Self {
        VersionLabel {
            hash: hash.into(),
            date,
        }
    }

    /// Reads HEAD from git and today's local date. A failed git lookup leaves the hash empty,
    /// git output that is not UTF-8 is an error.
    pub fn current(repo: Option<&Path>) -> Result<Self> {
        let hash = git::short_head_or_empty(repo)?;
        Ok(VersionLabel::new(hash, Local::now().date_naive()))
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version {} ({})", self.hash, self.date.format("%Y-%m-%d"))
    }
}
