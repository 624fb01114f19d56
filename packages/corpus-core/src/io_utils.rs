//! I/O utilities for table loading and export.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::CorpusError;

/// Classifies I/O errors into `CorpusError` variants.
///
/// A `NotFound` on a table file becomes `MissingFile`; everything else is an
/// `IoError` carrying the context.
pub fn classify_io_error(error: std::io::Error, table: &str, path: &Path) -> CorpusError {
    match error.kind() {
        ErrorKind::NotFound => CorpusError::MissingFile {
            table: table.to_string(),
            path: path.to_path_buf(),
        },
        ErrorKind::InvalidData => CorpusError::IoError(format!(
            "{} ({}): not valid UTF-8: {}",
            table,
            path.display(),
            error
        )),
        _ => CorpusError::IoError(format!("{} ({}): {}", table, path.display(), error)),
    }
}

/// Wraps an I/O error with a free-form context string.
pub fn io_error(error: std::io::Error, context: &str) -> CorpusError {
    CorpusError::IoError(format!("{}: {}", context, error))
}
