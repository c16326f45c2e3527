use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use log::{error, info};

use crate::aggregate::{render_file_table, GroupPartition};
use crate::classifier::DELIMITER;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::filter::{split_list, RecordFilter};
use crate::identifiers::IdentifierExtractor;
use crate::models::LogRecord;
use crate::observer::ParseObserver;
use crate::parser::parse_log;
use crate::textio::{read_text, resolve_encoding, write_text};

/// Filtered records in chronological order, plus parse statistics.
#[derive(Debug, Default)]
pub struct WorkingSet {
    pub records: Vec<LogRecord>,
    pub parsed: usize,
    pub malformed: usize,
}

/// What a run produced. Failed outputs do not stop the others.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub parsed: usize,
    pub malformed: usize,
    pub kept: usize,
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

pub struct LogReporter {
    config: ReportConfig,
    encoding: &'static Encoding,
    filter: RecordFilter,
    extractor: IdentifierExtractor,
}

impl LogReporter {
    /// Validates encoding and patterns up front so a bad setting fails the
    /// run before any output is touched.
    pub fn new(config: ReportConfig) -> Result<Self> {
        let encoding = resolve_encoding(&config.encoding)?;
        let filter = RecordFilter::new(
            &config.users,
            &config.include_messages,
            &config.exclude_messages,
        )?;
        let extractor = IdentifierExtractor::new(&config.identifier_prefix)?;

        Ok(LogReporter {
            config,
            encoding,
            filter,
            extractor,
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Parses the input export and builds the working set.
    ///
    /// Exports list newest changesets first; the working set is oldest first.
    pub fn collect_history(&self, observer: &mut dyn ParseObserver) -> Result<WorkingSet> {
        info!("Parsing {}", self.config.input.display());
        let text = read_text(&self.config.input, self.encoding)?;
        let outcome = parse_log(text.lines(), observer);

        let mut records: Vec<LogRecord> = outcome
            .records
            .into_iter()
            .filter(|record| self.filter.includes(record))
            .collect();
        records.reverse();

        info!(
            "Kept {} of {} changesets ({} malformed)",
            records.len(),
            outcome.blocks,
            outcome.malformed
        );

        Ok(WorkingSet {
            records,
            parsed: outcome.blocks,
            malformed: outcome.malformed,
        })
    }

    /// Writes every configured output for the working set.
    pub fn save_reports(&self, working_set: &WorkingSet) -> RunSummary {
        let mut summary = RunSummary {
            parsed: working_set.parsed,
            malformed: working_set.malformed,
            kept: working_set.records.len(),
            ..Default::default()
        };
        let records: Vec<&LogRecord> = working_set.records.iter().collect();

        if !self.config.dump_file.is_empty() {
            let path = self.config.output_root.join(&self.config.dump_file);
            let text = render_dump(&records);
            self.write_output(&path, &text, &mut summary);
        }

        if !self.config.statistics_file.is_empty() {
            let path = self.config.output_root.join(&self.config.statistics_file);
            self.save_file_statistics(&records, &path, &mut summary);
        }

        let group_keys = split_list(&self.config.group_keys, ',');
        if !group_keys.is_empty() {
            let partition = GroupPartition::new(&records, &group_keys);
            for (name, group) in partition.non_empty() {
                let path = self.config.output_root.join(format!("{}.csv", name));
                self.save_file_statistics(group, &path, &mut summary);
            }
        }

        summary
    }

    /// Full pipeline: parse, filter, write.
    pub fn run(&self, observer: &mut dyn ParseObserver) -> Result<RunSummary> {
        let working_set = self.collect_history(observer)?;
        Ok(self.save_reports(&working_set))
    }

    fn save_file_statistics(&self, records: &[&LogRecord], path: &Path, summary: &mut RunSummary) {
        let mut text = render_file_table(records);

        if self.config.export_identifiers {
            let group_key = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            text.push_str(DELIMITER);
            text.push('\n');
            for line in self.extractor.summarize(&group_key, records) {
                text.push_str(&line.to_string());
                text.push('\n');
            }
        }

        self.write_output(path, &text, summary);
    }

    fn write_output(&self, path: &Path, text: &str, summary: &mut RunSummary) {
        match write_text(path, text, self.encoding) {
            Ok(()) => {
                info!("Wrote {}", path.display());
                summary.written.push(path.to_path_buf());
            }
            Err(err) => {
                error!("Skipping {}: {}", path.display(), err);
                summary.failed.push((path.to_path_buf(), err.to_string()));
            }
        }
    }
}

/// Renders records back into the export format.
pub fn render_dump(records: &[&LogRecord]) -> String {
    records.iter().map(|record| record.to_string()).collect()
}
