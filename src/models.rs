use std::fmt;

use crate::classifier::{labels, DELIMITER};

/// One file touched by a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    pub status: String,
    pub path: String,
}

/// One changeset parsed from a history export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    pub changeset: String,
    pub author: String,
    /// Kept verbatim, the export's date format is locale dependent.
    pub date: String,
    pub message: String,
    pub items: Vec<ChangeItem>,
}

impl LogRecord {
    /// Records without a changeset id are kept but reported as malformed.
    pub fn is_malformed(&self) -> bool {
        self.changeset.is_empty()
    }
}

impl fmt::Display for ChangeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {} {}", self.status, self.path)
    }
}

/// Renders the record in the export block format, so a dump can be fed
/// back in as input.
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", DELIMITER)?;
        writeln!(f, "{}: {}", labels::CHANGESET, self.changeset)?;
        writeln!(f, "{}: {}", labels::USER, self.author)?;
        writeln!(f, "{}: {}", labels::DATE, self.date)?;
        writeln!(f)?;
        writeln!(f, "{}: ", labels::MESSAGE)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        writeln!(f, "{}:", labels::ITEMS)?;
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        writeln!(f)
    }
}
