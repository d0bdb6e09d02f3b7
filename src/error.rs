//! Fatal error taxonomy for a comparison run
//!
//! Per-line parse failures never surface here: the report parser drops those
//! lines silently. Everything in [`CompareError`] ends the run with exit status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that terminate a comparison run
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("No results found: nothing matches {pattern} under {}", base.display())]
    NoResultsDir { base: PathBuf, pattern: String },

    #[error("No PostgreSQL versions found in {}", dir.display())]
    NoVersions { dir: PathBuf },

    #[error("No data parsed\nTip: Reports need 'Self' column > 0%")]
    NoData,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
