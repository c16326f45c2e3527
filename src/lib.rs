//! Parse TFS history exports and turn them into filtered logs and per-file
//! change statistics.

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod identifiers;
pub mod models;
pub mod observer;
pub mod parser;
pub mod reporter;
pub mod textio;

#[cfg(feature = "python")]
mod python;

pub use crate::config::ReportConfig;
pub use crate::error::{Result, TfsLogError};
pub use crate::models::{ChangeItem, LogRecord};
pub use crate::observer::{LogObserver, NullObserver, ParseObserver};
pub use crate::reporter::{LogReporter, RunSummary, WorkingSet};
