use log::{debug, info, trace, warn};

use crate::models::LogRecord;

/// Hooks invoked by the parser at block and record boundaries.
///
/// Observers only watch; nothing they do feeds back into parsing.
pub trait ParseObserver {
    fn on_block(&mut self, _index: usize, _line_count: usize) {}

    fn on_record(&mut self, _index: usize, _record: &LogRecord) {}

    fn on_malformed(&mut self, _index: usize, _record: &LogRecord) {}

    fn on_finished(&mut self, _blocks: usize) {}
}

/// Forwards parse events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn on_block(&mut self, index: usize, line_count: usize) {
        trace!("parselog iteration {} ({} lines)", index + 1, line_count);
    }

    fn on_record(&mut self, index: usize, record: &LogRecord) {
        debug!(
            "record {}: changeset {} by {} touching {} file(s)",
            index + 1,
            record.changeset,
            record.author,
            record.items.len()
        );
    }

    fn on_malformed(&mut self, index: usize, record: &LogRecord) {
        warn!(
            "invalid log parsed: block {} has no changeset (user '{}', {} item(s))",
            index + 1,
            record.author,
            record.items.len()
        );
    }

    fn on_finished(&mut self, blocks: usize) {
        info!("parselog done, {} block(s)", blocks);
    }
}

#[derive(Debug, Default)]
pub struct NullObserver;

impl ParseObserver for NullObserver {}
