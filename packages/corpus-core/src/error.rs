//! Corpus reader error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying the corpus.
#[derive(Error, Debug, Clone)]
pub enum CorpusError {
    /// A required table file is absent from the data directory
    #[error("Table '{table}' is missing: {path} does not exist")]
    MissingFile { table: String, path: PathBuf },

    /// A data row has fewer fields than the table schema requires
    #[error("Malformed row at line {line} of table '{table}': expected {expected} fields, found {found}")]
    MalformedRow {
        table: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Too many malformed rows in a single table
    #[error("Table '{table}' has {count} malformed rows (limit {limit})")]
    TooManyMalformedRows {
        table: String,
        count: usize,
        limit: usize,
    },

    /// Foreign key does not resolve to a loaded row
    #[error("Dangling reference: {table}.{column} = '{id}' does not resolve")]
    DanglingReference {
        table: String,
        column: String,
        id: String,
    },

    /// Vocabulary or stopword file could not be used
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// I/O error while reading or writing tables
    #[error("I/O error: {0}")]
    IoError(String),
}

impl CorpusError {
    pub(crate) fn dangling(table: &str, column: &str, id: &str) -> Self {
        CorpusError::DanglingReference {
            table: table.to_string(),
            column: column.to_string(),
            id: id.to_string(),
        }
    }
}
