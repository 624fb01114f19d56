//! Tab-separated table loader.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ReaderConfig;
use crate::error::CorpusError;
use crate::io_utils::{classify_io_error, io_error};

use super::schema::TableSchema;
use super::table::{MalformedRow, Table};

/// Strips the outer quotes of a quoted field and collapses doubled quotes.
///
/// Fields not wrapped in quotes pass through unchanged. A lone `"` is an
/// empty quoted field.
pub fn unescape_field(field: &str) -> Cow<'_, str> {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        Cow::Owned(field[1..field.len() - 1].replace("\"\"", "\""))
    } else if field == "\"" {
        Cow::Borrowed("")
    } else {
        Cow::Borrowed(field)
    }
}

/// Loads table files into `Table`s.
#[derive(Debug, Clone)]
pub struct TableLoader {
    max_malformed_rows: usize,
}

impl TableLoader {
    /// Creates a loader that aborts a table once it exceeds
    /// `max_malformed_rows` rejected rows.
    pub fn new(max_malformed_rows: usize) -> Self {
        Self { max_malformed_rows }
    }

    pub fn from_config(config: &ReaderConfig) -> Self {
        Self::new(config.max_malformed_rows)
    }

    /// Loads `schema`'s file from the configured data directory.
    pub fn load_from(&self, config: &ReaderConfig, schema: TableSchema) -> Result<Table, CorpusError> {
        self.load(&config.table_path(schema.name), schema)
    }

    /// Loads a table file.
    ///
    /// # Returns
    /// `MissingFile` when `path` does not exist, `TooManyMalformedRows` when
    /// the malformed-row ceiling is exceeded, the loaded table otherwise.
    pub fn load(&self, path: &Path, schema: TableSchema) -> Result<Table, CorpusError> {
        let file = File::open(path).map_err(|e| classify_io_error(e, schema.name, path))?;
        let table = self
            .parse(BufReader::new(file), schema)
            .map_err(|e| match e {
                CorpusError::IoError(msg) => {
                    CorpusError::IoError(format!("{} ({}): {}", schema.name, path.display(), msg))
                }
                other => other,
            })?;
        tracing::debug!(
            "Loaded table {} from {}: {} rows, {} malformed",
            schema.name,
            path.display(),
            table.len(),
            table.malformed_rows().len()
        );
        Ok(table)
    }

    /// Parses a table from any buffered reader.
    ///
    /// The first line is the header and is skipped. Each remaining line has
    /// its trailing `\r`/`\n` characters stripped and is split on tabs; the
    /// first field is the row ID.
    pub fn parse<R: BufRead>(&self, mut reader: R, schema: TableSchema) -> Result<Table, CorpusError> {
        let mut table = Table::new(schema);
        let expected = schema.field_count();
        let mut buf = String::new();
        let mut line_number = 0usize;

        loop {
            buf.clear();
            let read = reader
                .read_line(&mut buf)
                .map_err(|e| io_error(e, &format!("line {}", line_number + 1)))?;
            if read == 0 {
                break;
            }
            line_number += 1;
            if line_number == 1 {
                continue;
            }

            let line = buf.trim_end_matches(['\r', '\n']);
            let mut fields: Vec<String> = if schema.unescape_quotes {
                line.split('\t')
                    .map(|field| unescape_field(field).into_owned())
                    .collect()
            } else {
                line.split('\t').map(str::to_string).collect()
            };

            if fields.len() < expected {
                tracing::warn!(
                    "Skipping malformed row in table {} at line {}: expected {} fields, found {}: {:?}",
                    schema.name,
                    line_number,
                    expected,
                    fields.len(),
                    line
                );
                table.push_malformed(MalformedRow {
                    line: line_number,
                    found: fields.len(),
                    raw: line.to_string(),
                });
                let count = table.malformed_rows().len();
                if count > self.max_malformed_rows {
                    return Err(CorpusError::TooManyMalformedRows {
                        table: schema.name.to_string(),
                        count,
                        limit: self.max_malformed_rows,
                    });
                }
                continue;
            }

            let id = fields.remove(0);
            if table.insert(id, fields) {
                tracing::warn!(
                    "Duplicate row id in table {} at line {}; later row replaces earlier one",
                    schema.name,
                    line_number
                );
            }
        }

        Ok(table)
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::from_config(&ReaderConfig::default())
    }
}
