use std::path::PathBuf;

use thiserror::Error;

/// Configuration problems detected before any case runs.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("program not found: {path}")]
    ProgramNotFound { path: PathBuf },

    #[error("test root directory not found: {path}")]
    TestRootNotFound { path: PathBuf },

    #[error("field file not found: {path}")]
    FieldFileNotFound { path: PathBuf },

    #[error("could not read field file {path}: {source}")]
    FieldFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
