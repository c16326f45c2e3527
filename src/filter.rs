//! Selection of the records that make up the working set.

use regex::{Regex, RegexBuilder};

use crate::classifier::trim_value;
use crate::error::{Result, TfsLogError};
use crate::models::LogRecord;

/// Splits a configuration list, dropping empty entries and duplicates while
/// keeping first-seen order.
pub fn split_list(value: &str, separator: char) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for entry in value.split(separator).map(trim_value) {
        if !entry.is_empty() && !result.iter().any(|seen| seen == entry) {
            result.push(entry.to_string());
        }
    }
    result
}

/// Shell-style wildcard (`*`, `?`) matched case-insensitively anywhere in the
/// text.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let translated = regex::escape(pattern)
            .replace(r"\?", ".")
            .replace(r"\*", ".*");

        let regex = RegexBuilder::new(&translated)
            .case_insensitive(true)
            .build()
            .map_err(|source| TfsLogError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(WildcardPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

fn compile_list(value: &str) -> Result<Vec<WildcardPattern>> {
    split_list(value, ',')
        .iter()
        .map(|pattern| WildcardPattern::new(pattern))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    users: Vec<WildcardPattern>,
    include_messages: Vec<WildcardPattern>,
    exclude_messages: Vec<WildcardPattern>,
}

impl RecordFilter {
    /// Builds a filter from comma-separated pattern lists.
    pub fn new(users: &str, include_messages: &str, exclude_messages: &str) -> Result<Self> {
        Ok(RecordFilter {
            users: compile_list(users)?,
            include_messages: compile_list(include_messages)?,
            exclude_messages: compile_list(exclude_messages)?,
        })
    }

    /// Exclusions veto everything; otherwise a record is kept when either its
    /// author or its message matches.
    pub fn includes(&self, record: &LogRecord) -> bool {
        if self
            .exclude_messages
            .iter()
            .any(|pattern| pattern.is_match(&record.message))
        {
            return false;
        }

        self.users.iter().any(|pattern| pattern.is_match(&record.author))
            || self
                .include_messages
                .iter()
                .any(|pattern| pattern.is_match(&record.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(author: &str, message: &str) -> LogRecord {
        LogRecord {
            changeset: "1".into(),
            author: author.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_list_trims_and_dedups() {
        assert_eq!(split_list(" alice, bob ,,alice、,carol", ','), vec!["alice", "bob", "carol"]);
        assert!(split_list("", ',').is_empty());
        assert!(split_list(" , ,", ',').is_empty());
    }

    #[test]
    fn test_wildcards() {
        let star = WildcardPattern::new("*").unwrap();
        assert!(star.is_match(""));
        assert!(star.is_match("anyone"));

        let pattern = WildcardPattern::new("DOMAIN\\zh?ng*").unwrap();
        assert!(pattern.is_match("domain\\zhang san"));
        assert!(pattern.is_match("CORP DOMAIN\\zhong"));
        assert!(!pattern.is_match("domain\\zng"));
        assert_eq!(pattern.as_str(), "DOMAIN\\zh?ng*");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = WildcardPattern::new("fix(ui)+").unwrap();
        assert!(pattern.is_match("Fix(UI)+ layout"));
        assert!(!pattern.is_match("fixuiui"));
    }

    #[test]
    fn test_default_user_wildcard_keeps_everything() {
        let filter = RecordFilter::new("*", "", "").unwrap();
        assert!(filter.includes(&record("alice", "anything")));
        assert!(filter.includes(&record("", "")));
    }

    #[test]
    fn test_empty_configuration_keeps_nothing() {
        let filter = RecordFilter::new("", "", "").unwrap();
        assert!(!filter.includes(&record("alice", "anything")));
    }

    #[test]
    fn test_user_or_message_inclusion() {
        let filter = RecordFilter::new("alice", "hotfix", "").unwrap();
        assert!(filter.includes(&record("Alice", "refactor")));
        assert!(filter.includes(&record("bob", "HOTFIX for login")));
        assert!(!filter.includes(&record("bob", "refactor")));
    }

    #[test]
    fn test_exclusion_dominates_inclusion() {
        let filter = RecordFilter::new("alice", "", "revert*").unwrap();
        assert!(!filter.includes(&record("alice", "Revert 1234")));
        assert!(filter.includes(&record("alice", "fix 1234")));
    }
}
