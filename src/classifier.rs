//! Line classification for TFS history exports.
//!
//! Every line of an export is one of: a delimiter between changesets, a
//! labelled field marker, or free content belonging to the current section.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum run of dash characters that separates two changesets.
pub const DELIMITER_MIN_RUN: usize = 100;

/// Delimiter written back when rendering records.
pub const DELIMITER: &str =
    "----------------------------------------------------------------------------------------------------";

const DASH_CHARS: [char; 3] = ['-', '─', '—'];

/// Characters stripped from captured marker values.
pub const TRIM_CHARS: [char; 5] = [' ', '\t', '、', '\n', '\r'];

/// Localized labels used by the export and by rendered output.
pub mod labels {
    pub const CHANGESET: &str = "变更集";
    pub const USER: &str = "用户";
    pub const DATE: &str = "日期";
    pub const MESSAGE: &str = "注释";
    pub const ITEMS: &str = "项";
}

static CHANGESET_RE: Lazy<Regex> = Lazy::new(|| marker_regex(labels::CHANGESET));
static USER_RE: Lazy<Regex> = Lazy::new(|| marker_regex(labels::USER));
static DATE_RE: Lazy<Regex> = Lazy::new(|| marker_regex(labels::DATE));
static MESSAGE_RE: Lazy<Regex> = Lazy::new(|| marker_regex(labels::MESSAGE));
static ITEMS_RE: Lazy<Regex> = Lazy::new(|| marker_regex(labels::ITEMS));

fn marker_regex(label: &str) -> Regex {
    Regex::new(&format!(r"^\s*{}\s*[:：](.*)$", regex::escape(label)))
        .expect("marker pattern is valid")
}

/// What a single export line means to the record parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Delimiter,
    Changeset(&'a str),
    User(&'a str),
    Date(&'a str),
    MessageMarker,
    ItemsMarker,
    Content(&'a str),
}

#[derive(Debug, Clone, Copy)]
enum Marker {
    Changeset,
    User,
    Date,
    Message,
    Items,
}

/// Markers are tried in this order; the first match wins.
const MARKER_ORDER: [Marker; 5] = [
    Marker::Changeset,
    Marker::User,
    Marker::Date,
    Marker::Message,
    Marker::Items,
];

impl Marker {
    fn pattern(self) -> &'static Regex {
        match self {
            Marker::Changeset => &CHANGESET_RE,
            Marker::User => &USER_RE,
            Marker::Date => &DATE_RE,
            Marker::Message => &MESSAGE_RE,
            Marker::Items => &ITEMS_RE,
        }
    }

    fn capture(self, line: &str) -> Option<LineKind<'_>> {
        let caps = self.pattern().captures(line)?;
        let value = caps.get(1).map_or("", |m| trim_value(m.as_str()));
        Some(match self {
            Marker::Changeset => LineKind::Changeset(value),
            Marker::User => LineKind::User(value),
            Marker::Date => LineKind::Date(value),
            Marker::Message => LineKind::MessageMarker,
            Marker::Items => LineKind::ItemsMarker,
        })
    }
}

pub fn classify(line: &str) -> LineKind<'_> {
    if is_delimiter(line) {
        return LineKind::Delimiter;
    }

    MARKER_ORDER
        .iter()
        .find_map(|marker| marker.capture(line))
        .unwrap_or(LineKind::Content(line))
}

/// A delimiter is a line made only of one repeated dash character, at least
/// [`DELIMITER_MIN_RUN`] long.
pub fn is_delimiter(line: &str) -> bool {
    let line = line.trim();
    let mut chars = line.chars();
    let first = match chars.next() {
        Some(c) if DASH_CHARS.contains(&c) => c,
        _ => return false,
    };

    chars.all(|c| c == first) && line.chars().count() >= DELIMITER_MIN_RUN
}

pub fn trim_value(value: &str) -> &str {
    value.trim_matches(&TRIM_CHARS[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_requires_min_run() {
        assert_eq!(classify(DELIMITER), LineKind::Delimiter);
        assert_eq!(classify(&"-".repeat(140)), LineKind::Delimiter);

        let short = "-".repeat(DELIMITER_MIN_RUN - 1);
        assert_eq!(classify(&short), LineKind::Content(short.as_str()));
    }

    #[test]
    fn test_delimiter_rejects_mixed_runs() {
        let mixed = format!("{}x", "-".repeat(120));
        assert!(!is_delimiter(&mixed));
        assert!(is_delimiter(&format!("{}\r", "─".repeat(100))));
        assert!(!is_delimiter(""));
    }

    #[test]
    fn test_localized_markers() {
        assert_eq!(classify("变更集: 1234"), LineKind::Changeset("1234"));
        assert_eq!(classify("用户: 张三、"), LineKind::User("张三"));
        assert_eq!(classify("日期: 2019年3月5日 10:22:11\r"), LineKind::Date("2019年3月5日 10:22:11"));
        assert_eq!(classify("注释:"), LineKind::MessageMarker);
        assert_eq!(classify("项:"), LineKind::ItemsMarker);
    }

    #[test]
    fn test_full_width_separator_and_indent() {
        assert_eq!(classify("日期：2019/3/5"), LineKind::Date("2019/3/5"));
        assert_eq!(classify("  项:"), LineKind::ItemsMarker);
    }

    #[test]
    fn test_english_labels_are_content() {
        for line in ["Changeset: 42", "User: profile page", "Date: pickers", "Comment: x", "Items: sort order fixed"] {
            assert_eq!(classify(line), LineKind::Content(line));
        }
    }

    #[test]
    fn test_content_lines() {
        assert_eq!(classify("  fix the login page"), LineKind::Content("  fix the login page"));
        assert_eq!(classify("  edit $/Proj/a.cs"), LineKind::Content("  edit $/Proj/a.cs"));
        assert_eq!(classify("user interface tweaks"), LineKind::Content("user interface tweaks"));
    }

    #[test]
    fn test_marker_priority_order() {
        // A changeset line mentioning another label is still a changeset.
        assert_eq!(classify("变更集: 用户: x"), LineKind::Changeset("用户: x"));
    }

    #[test]
    fn test_empty_marker_value() {
        assert_eq!(classify("用户:"), LineKind::User(""));
    }
}
