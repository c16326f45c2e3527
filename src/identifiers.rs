//! Issue numbers (`PC-1234` style) embedded in commit messages.

use std::fmt;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use crate::error::{Result, TfsLogError};
use crate::models::LogRecord;

pub const DEFAULT_PREFIX: &str = "PC";

/// Group keys containing this marker get one summary line per author.
pub const PER_AUTHOR_MARKER: &str = "旧功能";

const SEGMENT_SEPARATOR: char = '_';
const EMPTY_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    prefix: String,
    regex: Regex,
}

impl IdentifierExtractor {
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(r"{}-\d+", regex::escape(prefix));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| TfsLogError::InvalidPattern {
                pattern: prefix.to_string(),
                source,
            })?;

        Ok(IdentifierExtractor {
            prefix: prefix.to_string(),
            regex,
        })
    }

    /// All identifiers in the message, in order of appearance, duplicates kept.
    pub fn extract(&self, message: &str) -> Vec<String> {
        message
            .split(SEGMENT_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .flat_map(|segment| self.regex.find_iter(segment))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn collect(&self, records: &[&LogRecord]) -> Vec<String> {
        unique_sorted(
            records
                .iter()
                .flat_map(|record| self.extract(&record.message))
                .collect(),
        )
    }

    /// Summary lines for a report named `group_key`.
    pub fn summarize(&self, group_key: &str, records: &[&LogRecord]) -> Vec<IdentifierLine> {
        if !group_key.contains(PER_AUTHOR_MARKER) {
            return vec![IdentifierLine {
                label: format!("{}_WZK_{}_", self.prefix.to_uppercase(), group_key),
                identifiers: self.collect(records),
            }];
        }

        let mut by_author: IndexMap<&str, Vec<&LogRecord>> = IndexMap::new();
        for record in records {
            by_author.entry(record.author.as_str()).or_default().push(*record);
        }

        by_author
            .into_iter()
            .map(|(author, records)| IdentifierLine {
                label: format!("{}：", author),
                identifiers: self.collect(&records),
            })
            .collect()
    }
}

/// Exact-string dedup followed by a plain lexicographic sort.
pub fn unique_sorted(mut identifiers: Vec<String>) -> Vec<String> {
    identifiers.sort();
    identifiers.dedup();
    identifiers
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierLine {
    pub label: String,
    pub identifiers: Vec<String>,
}

/// Identifiers are joined without a separator.
impl fmt::Display for IdentifierLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identifiers.is_empty() {
            write!(f, "{}{}", self.label, EMPTY_PLACEHOLDER)
        } else {
            write!(f, "{}{}", self.label, self.identifiers.concat())
        }
    }
}
