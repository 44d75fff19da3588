//! Engine error types.
//!
//! "No pair found" is the expected frequent outcome of a search and is
//! communicated as `Ok(None)`, never through these types. Errors are
//! reserved for configuration mismatches and invalid caller input.

use pairseek_core::DelimiterClass;
use thiserror::Error;

/// Errors from the surrounding-pair engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested delimiter classes have no spellings for the current
    /// language, so a search can never succeed.
    #[error("no delimiter spellings for {classes:?} in language '{language}'")]
    UnsupportedDelimiter {
        /// The classes that resolved to no spellings
        classes: Vec<DelimiterClass>,
        /// The language the catalog was queried for
        language: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// The selection offsets do not lie within the document.
    #[error("selection {start}..{end} is outside the document (length {document_len})")]
    InvalidSelection {
        /// Selection start offset
        start: usize,
        /// Selection end offset
        end: usize,
        /// Total document length in bytes
        document_len: usize,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
