//! Per-file change tables and keyword grouping over the working set.

use indexmap::IndexMap;

use crate::models::LogRecord;

/// Name of the bucket holding records that match no group keyword.
pub const OTHER_GROUP: &str = "other";

const JOIN_SEPARATOR: &str = " | ";
const UNKNOWN_STATUS: &str = "unkown";

/// File path to the records that touched it, both in first-seen order.
pub type FileIndex<'a> = IndexMap<&'a str, Vec<&'a LogRecord>>;

pub fn build_file_index<'a>(records: &[&'a LogRecord]) -> FileIndex<'a> {
    let mut index: FileIndex<'a> = IndexMap::new();
    for &record in records {
        for item in &record.items {
            let touched_by = index.entry(item.path.as_str()).or_default();
            if !touched_by.last().is_some_and(|last| std::ptr::eq(*last, record)) {
                touched_by.push(record);
            }
        }
    }
    index
}

/// One row of the per-file table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub path: String,
    pub status: String,
    pub changesets: String,
}

impl FileRow {
    fn build(path: &str, records: &[&LogRecord]) -> Self {
        let changesets: Vec<&str> = records.iter().map(|r| r.changeset.as_str()).collect();

        let statuses: Vec<&str> = records
            .iter()
            .flat_map(|record| record.items.iter())
            .filter(|item| item.path == path)
            .map(|item| item.status.as_str())
            .collect();

        let status = if statuses.is_empty() {
            UNKNOWN_STATUS.to_string()
        } else {
            statuses.join(JOIN_SEPARATOR).replace(',', JOIN_SEPARATOR)
        };

        FileRow {
            path: path.to_string(),
            status,
            changesets: changesets.join(JOIN_SEPARATOR),
        }
    }

    pub fn to_csv_line(&self) -> String {
        format!("{},{},{}", self.path, self.status, self.changesets)
    }
}

pub fn file_rows(index: &FileIndex<'_>) -> Vec<FileRow> {
    index
        .iter()
        .map(|(path, records)| FileRow::build(path, records))
        .collect()
}

/// Renders the per-file table, one CSV line per touched path.
pub fn render_file_table(records: &[&LogRecord]) -> String {
    let index = build_file_index(records);
    let mut out = String::new();
    for row in file_rows(&index) {
        out.push_str(&row.to_csv_line());
        out.push('\n');
    }
    out
}

/// Keyword buckets plus the remainder.
///
/// Keywords are tested independently, so a record can sit in several named
/// buckets. The remainder only holds records matching no keyword at all.
#[derive(Debug, Default)]
pub struct GroupPartition<'a> {
    pub groups: Vec<(String, Vec<&'a LogRecord>)>,
    pub other: Vec<&'a LogRecord>,
}

impl<'a> GroupPartition<'a> {
    pub fn new(records: &[&'a LogRecord], keywords: &[String]) -> Self {
        let groups = keywords
            .iter()
            .map(|keyword| {
                let matching = records
                    .iter()
                    .copied()
                    .filter(|record| record.message.contains(keyword.as_str()))
                    .collect();
                (keyword.clone(), matching)
            })
            .collect();

        let other = records
            .iter()
            .copied()
            .filter(|record| !keywords.iter().any(|k| record.message.contains(k.as_str())))
            .collect();

        GroupPartition { groups, other }
    }

    /// Non-empty buckets in output order, the remainder last.
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &[&'a LogRecord])> + '_ {
        self.groups
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
            .chain(std::iter::once((OTHER_GROUP, self.other.as_slice())))
            .filter(|(_, records)| !records.is_empty())
    }
}
