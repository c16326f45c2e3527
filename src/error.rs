use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TfsLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input log not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Create DIR [{}] failed: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TfsLogError>;
