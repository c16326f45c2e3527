use std::path::PathBuf;

use crate::identifiers::DEFAULT_PREFIX;
use crate::textio::DEFAULT_ENCODING;

/// Settings for one report run. Empty output names disable that output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub encoding: String,
    /// Comma-separated wildcard patterns matched against the author.
    pub users: String,
    /// Comma-separated wildcard patterns that pull records in by message.
    pub include_messages: String,
    /// Comma-separated wildcard patterns that drop records by message.
    pub exclude_messages: String,
    pub output_root: PathBuf,
    pub dump_file: String,
    pub statistics_file: String,
    /// Comma-separated keywords, one grouped table per keyword.
    pub group_keys: String,
    pub export_identifiers: bool,
    pub identifier_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            input: PathBuf::from("tfs.txt"),
            encoding: DEFAULT_ENCODING.to_string(),
            users: "*".to_string(),
            include_messages: String::new(),
            exclude_messages: String::new(),
            output_root: PathBuf::from("output"),
            dump_file: String::new(),
            statistics_file: String::new(),
            group_keys: String::new(),
            export_identifiers: false,
            identifier_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}
