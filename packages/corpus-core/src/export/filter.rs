//! Writes filtered copies of an entry table and its annotation table.
//!
//! Retained rows are copied byte-for-byte from the source files, header
//! included, so the output loads exactly like the input.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::ReaderConfig;
use crate::error::CorpusError;
use crate::io_utils::{classify_io_error, io_error};
use crate::table::{unescape_field, TableSchema};

/// Tables copied unchanged into an export; absent ones are skipped.
pub const STATIC_TABLES: &[&str] = &[
    "book",
    "component",
    "corpusversion",
    "dictdata",
    "language_iso",
    "language_bookname",
    "language_src",
    "language_tgt",
    "nondictdata",
    "wordlistdata",
    "wordlistconcept",
];

/// Rows written by one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub entries: usize,
    pub annotations: usize,
}

/// Copies selected rows of corpus tables from one directory to another.
#[derive(Debug, Clone)]
pub struct TableFilter {
    input: ReaderConfig,
    output_dir: PathBuf,
}

impl TableFilter {
    /// Reads tables as configured by `input` and writes into `output_dir`,
    /// creating it if needed.
    ///
    /// # Returns
    /// `IoError` when `output_dir` resolves to the input data directory.
    pub fn new(input: &ReaderConfig, output_dir: impl Into<PathBuf>) -> Result<Self, CorpusError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .map_err(|e| io_error(e, &format!("creating {}", output_dir.display())))?;

        let output_canonical = fs::canonicalize(&output_dir)
            .map_err(|e| io_error(e, &format!("resolving {}", output_dir.display())))?;
        // an input directory that cannot be resolved fails later as MissingFile
        if let Ok(input_canonical) = fs::canonicalize(&input.data_dir) {
            if input_canonical == output_canonical {
                return Err(CorpusError::IoError(format!(
                    "export directory {} is the input data directory",
                    output_dir.display()
                )));
            }
        }

        Ok(Self {
            input: input.clone(),
            output_dir,
        })
    }

    fn output_path(&self, table: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", table, self.input.table_extension))
    }

    /// Copies every table of [`STATIC_TABLES`] that exists in the input.
    ///
    /// # Returns
    /// Names of the tables copied, in [`STATIC_TABLES`] order.
    pub fn copy_static_tables(&self) -> Result<Vec<String>, CorpusError> {
        let mut copied = Vec::new();
        for &table in STATIC_TABLES {
            let source = self.input.table_path(table);
            if !source.exists() {
                tracing::debug!("Skipping absent table {} ({})", table, source.display());
                continue;
            }
            fs::copy(&source, self.output_path(table))
                .map_err(|e| classify_io_error(e, table, &source))?;
            copied.push(table.to_string());
        }
        Ok(copied)
    }

    /// Writes the rows of `entries` whose ID is in `selected`, each followed
    /// by the rows of `annotations` that belong to it.
    ///
    /// Annotation rows are grouped under their entry in entry order, each
    /// group keeping annotation file order. A retained row that ended the
    /// source file without a line terminator gets a `\n`.
    pub fn filter(
        &self,
        entries: TableSchema,
        annotations: TableSchema,
        selected: &HashSet<String>,
    ) -> Result<FilterCounts, CorpusError> {
        let annotation_source = self.input.table_path(annotations.name);
        let annotation_target = self.output_path(annotations.name);
        let mut annotation_out = create(&annotation_target, annotations.name)?;

        let mut grouped: IndexMap<String, Vec<Vec<u8>>> = IndexMap::new();
        for_each_line(&annotation_source, annotations.name, |number, line| {
            if number == 1 {
                return write_line(&mut annotation_out, line, &annotation_target);
            }
            // entry_id is the second raw field, right after the row ID
            let entry_id = key_field(line, 1, annotations);
            if selected.contains(entry_id.as_str()) {
                grouped.entry(entry_id).or_default().push(line.to_vec());
            }
            Ok(())
        })?;

        let entry_source = self.input.table_path(entries.name);
        let entry_target = self.output_path(entries.name);
        let mut entry_out = create(&entry_target, entries.name)?;
        let mut counts = FilterCounts::default();

        for_each_line(&entry_source, entries.name, |number, line| {
            if number == 1 {
                return write_line(&mut entry_out, line, &entry_target);
            }
            let entry_id = key_field(line, 0, entries);
            if !selected.contains(entry_id.as_str()) {
                return Ok(());
            }
            write_line(&mut entry_out, line, &entry_target)?;
            counts.entries += 1;
            if let Some(rows) = grouped.get(&entry_id) {
                for row in rows {
                    write_line(&mut annotation_out, row, &annotation_target)?;
                    counts.annotations += 1;
                }
            }
            Ok(())
        })?;

        entry_out
            .flush()
            .map_err(|e| classify_io_error(e, entries.name, &entry_target))?;
        annotation_out
            .flush()
            .map_err(|e| classify_io_error(e, annotations.name, &annotation_target))?;

        tracing::debug!(
            "Filtered {}/{}: {} entries, {} annotations written",
            entries.name,
            annotations.name,
            counts.entries,
            counts.annotations
        );
        Ok(counts)
    }
}

fn create(path: &Path, table: &str) -> Result<BufWriter<File>, CorpusError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| classify_io_error(e, table, path))
}

/// Calls `f` with each raw line (terminator included) and its 1-based number.
fn for_each_line<F>(path: &Path, table: &str, mut f: F) -> Result<(), CorpusError>
where
    F: FnMut(usize, &[u8]) -> Result<(), CorpusError>,
{
    let file = File::open(path).map_err(|e| classify_io_error(e, table, path))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut number = 0usize;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| classify_io_error(e, table, path))?;
        if read == 0 {
            return Ok(());
        }
        number += 1;
        f(number, &buf)?;
    }
}

fn write_line<W: Write>(out: &mut W, line: &[u8], path: &Path) -> Result<(), CorpusError> {
    out.write_all(line)
        .and_then(|_| {
            if line.ends_with(b"\n") {
                Ok(())
            } else {
                out.write_all(b"\n")
            }
        })
        .map_err(|e| io_error(e, &format!("writing {}", path.display())))
}

/// Field `index` of a raw tab-separated line, terminators stripped.
fn raw_field(line: &[u8], index: usize) -> String {
    let text = String::from_utf8_lossy(line);
    text.trim_end_matches(['\r', '\n'])
        .split('\t')
        .nth(index)
        .unwrap_or_default()
        .to_string()
}

/// Field `index` as the loader keys it: unescaped when `schema` unescapes.
fn key_field(line: &[u8], index: usize, schema: TableSchema) -> String {
    let field = raw_field(line, index);
    if schema.unescape_quotes {
        unescape_field(&field).into_owned()
    } else {
        field
    }
}
