//! Loaded table: row ID to remaining fields, in file order.

use indexmap::IndexMap;

use crate::error::CorpusError;

use super::schema::TableSchema;

/// A data row rejected at load time because it had too few fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number in the source file (the header is line 1)
    pub line: usize,
    /// Number of fields the row actually had
    pub found: usize,
    /// The offending line, terminators stripped
    pub raw: String,
}

/// In-memory table keyed by row ID.
///
/// Every stored row has at least as many fields as its schema, so column
/// lookups on a loaded row only miss for IDs that were never loaded.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column layout the rows were validated against
    pub schema: TableSchema,
    rows: IndexMap<String, Vec<String>>,
    malformed: Vec<MalformedRow>,
    duplicate_ids: usize,
}

impl Table {
    pub(crate) fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: IndexMap::new(),
            malformed: Vec::new(),
            duplicate_ids: 0,
        }
    }

    /// Inserts a row; returns `true` when the ID was already present.
    ///
    /// A duplicated ID keeps the position of its first occurrence and the
    /// fields of its last.
    pub(crate) fn insert(&mut self, id: String, fields: Vec<String>) -> bool {
        let replaced = self.rows.insert(id, fields).is_some();
        if replaced {
            self.duplicate_ids += 1;
        }
        replaced
    }

    pub(crate) fn push_malformed(&mut self, row: MalformedRow) {
        self.malformed.push(row);
    }

    /// Table name.
    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    /// Number of loaded rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Returns the fields of row `id` (row ID excluded).
    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.rows.get(id).map(Vec::as_slice)
    }

    /// Returns one field of row `id`.
    pub fn field(&self, id: &str, column: usize) -> Option<&str> {
        self.rows
            .get(id)
            .and_then(|fields| fields.get(column))
            .map(String::as_str)
    }

    /// Looks up a row that some other table references through `column`.
    ///
    /// # Returns
    /// The referenced row, or `DanglingReference` naming the referencing
    /// table and column when `id` is not loaded.
    pub fn resolve(
        &self,
        id: &str,
        referencing_table: &str,
        referencing_column: &str,
    ) -> Result<&[String], CorpusError> {
        self.get(id)
            .ok_or_else(|| CorpusError::dangling(referencing_table, referencing_column, id))
    }

    /// Iterates `(id, fields)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.rows
            .iter()
            .map(|(id, fields)| (id.as_str(), fields.as_slice()))
    }

    /// Iterates row IDs in file order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.keys().map(String::as_str)
    }

    /// Rows rejected at load time.
    pub fn malformed_rows(&self) -> &[MalformedRow] {
        &self.malformed
    }

    /// Rejected rows as `MalformedRow` errors, for callers that surface them.
    pub fn malformed_errors(&self) -> impl Iterator<Item = CorpusError> + '_ {
        self.malformed.iter().map(|row| CorpusError::MalformedRow {
            table: self.schema.name.to_string(),
            line: row.line,
            expected: self.schema.field_count(),
            found: row.found,
        })
    }

    /// Number of data rows whose ID repeated an earlier row.
    pub fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }
}
