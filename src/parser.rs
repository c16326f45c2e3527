//! Splits a history export into changeset blocks and parses each block.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::{classify, is_delimiter, LineKind};
use crate::models::{ChangeItem, LogRecord};
use crate::observer::ParseObserver;

/// Prefixes the export puts in front of the status of merged items.
const MERGE_ANNOTATIONS: [&str; 2] = ["合并, ", "merge, "];

static ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+(?:,\s*\w+)*)\s+(\S.*?)\s*$").expect("item pattern is valid")
});

/// Lazily groups lines into the blocks found between delimiter lines.
///
/// Delimiters are dropped. Runs of delimiters, and blank lines that would
/// open a block, never produce an empty block.
pub struct Blocks<I> {
    lines: I,
}

impl<I> Blocks<I> {
    pub fn new(lines: I) -> Self {
        Blocks { lines }
    }
}

impl<I, S> Iterator for Blocks<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Vec<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut block = Vec::new();

        for line in self.lines.by_ref() {
            if is_delimiter(line.as_ref()) {
                if block.is_empty() {
                    continue;
                }
                return Some(block);
            }

            if block.is_empty() && line.as_ref().trim().is_empty() {
                continue;
            }

            block.push(line);
        }

        if block.is_empty() {
            None
        } else {
            Some(block)
        }
    }
}

/// Which part of a block the parser is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Idle,
    InMessage,
    InItems,
}

/// Builds one record from the lines of a single block.
pub fn parse_record<S: AsRef<str>>(lines: &[S]) -> LogRecord {
    let mut record = LogRecord::default();
    let mut section = Section::Idle;

    for line in lines {
        let line = line.as_ref();
        if line.trim_end_matches('\r').is_empty() {
            continue;
        }

        match classify(line) {
            LineKind::Delimiter => continue,
            LineKind::Changeset(value) => {
                record.changeset = value.to_string();
                section = Section::Idle;
            }
            LineKind::User(value) => {
                record.author = value.to_string();
                section = Section::Idle;
            }
            LineKind::Date(value) => {
                record.date = value.to_string();
                section = Section::Idle;
            }
            LineKind::MessageMarker => {
                // Once inside the item list a block never goes back to the message.
                if section != Section::InItems {
                    section = Section::InMessage;
                }
            }
            LineKind::ItemsMarker => section = Section::InItems,
            LineKind::Content(text) => match section {
                Section::InMessage => record.message.push_str(text),
                Section::InItems => {
                    if let Some(item) = parse_item(text) {
                        record.items.push(item);
                    }
                }
                Section::Idle => {}
            },
        }
    }

    record
}

/// Splits an item line into its status and path. Lines that do not look like
/// `<status> <path>` yield `None`.
pub fn parse_item(line: &str) -> Option<ChangeItem> {
    let line = MERGE_ANNOTATIONS
        .iter()
        .fold(line.to_string(), |acc, annotation| acc.replace(annotation, ""));

    let caps = ITEM_RE.captures(&line)?;
    Some(ChangeItem {
        status: caps[1].to_string(),
        path: caps[2].to_string(),
    })
}

/// Everything parsed out of one export, in source order.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<LogRecord>,
    pub blocks: usize,
    pub malformed: usize,
}

/// Parses every block of an export. Malformed records are reported to the
/// observer and kept.
pub fn parse_log<I, S>(lines: I, observer: &mut dyn ParseObserver) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut outcome = ParseOutcome::default();

    for (index, block) in Blocks::new(lines.into_iter()).enumerate() {
        observer.on_block(index, block.len());

        let record = parse_record(&block);
        if record.is_malformed() {
            outcome.malformed += 1;
            observer.on_malformed(index, &record);
        } else {
            observer.on_record(index, &record);
        }

        outcome.records.push(record);
        outcome.blocks += 1;
    }

    observer.on_finished(outcome.blocks);
    outcome
}
