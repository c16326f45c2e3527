use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tfslog::identifiers::DEFAULT_PREFIX;
use tfslog::textio::DEFAULT_ENCODING;
use tfslog::{LogObserver, LogReporter, ReportConfig, TfsLogError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TFS history export to parse
    #[arg(short = 't', long = "tfs", default_value = "tfs.txt")]
    input: PathBuf,

    /// Users to include, comma-separated wildcards
    #[arg(short, long, default_value = "*")]
    user: String,

    /// Commit message keywords to include, comma-separated wildcards
    #[arg(short, long, default_value = "")]
    commit_message: String,

    /// Commit message keywords to exclude, comma-separated wildcards
    #[arg(short, long, default_value = "")]
    exclude_commit_message: String,

    /// File name for the filtered log dump
    #[arg(short, long, default_value = "")]
    output: String,

    /// File name for the per-file change statistics
    #[arg(short, long, default_value = "")]
    file_statistics: String,

    /// Group keywords, comma-separated; one CSV per keyword plus other.csv
    #[arg(short, long, default_value = "")]
    group: String,

    /// Root directory for all outputs
    #[arg(short, long, default_value = "output")]
    path: PathBuf,

    /// Append the bug numbers found in commit messages to each statistics file
    #[arg(short = 'b', long)]
    export_bug_number: bool,

    /// Text encoding of the export and of the outputs (e.g. gbk, utf-8)
    #[arg(long, default_value = DEFAULT_ENCODING)]
    encoding: String,

    /// Prefix of the bug numbers to extract
    #[arg(long, default_value = DEFAULT_PREFIX)]
    bug_prefix: String,

    /// Log per-record details
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for ReportConfig {
    fn from(args: Args) -> Self {
        ReportConfig {
            input: args.input,
            encoding: args.encoding,
            users: args.user,
            include_messages: args.commit_message,
            exclude_messages: args.exclude_commit_message,
            output_root: args.path,
            dump_file: args.output,
            statistics_file: args.file_statistics,
            group_keys: args.group,
            export_identifiers: args.export_bug_number,
            identifier_prefix: args.bug_prefix,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let start_time = Instant::now();

    let log_filter = if args.verbose { "tfslog=debug" } else { "tfslog=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let reporter = LogReporter::new(args.into()).context("invalid configuration")?;

    let summary = match reporter.run(&mut LogObserver) {
        Ok(summary) => summary,
        Err(err @ TfsLogError::InputNotFound(_)) => {
            return Err(err).context("nothing to parse");
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to read {}", reporter.config().input.display())
            });
        }
    };

    println!(
        "Parsed {} changesets ({} malformed), kept {}. Wrote {} file(s), {} failed.",
        summary.parsed,
        summary.malformed,
        summary.kept,
        summary.written.len(),
        summary.failed.len()
    );
    println!("Done. cost {}ms.", start_time.elapsed().as_millis());

    Ok(())
}
