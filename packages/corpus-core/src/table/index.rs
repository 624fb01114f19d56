//! Foreign-key index: referenced ID to the referencing row IDs.

use indexmap::IndexMap;

use super::table::Table;

/// Groups the rows of a table by the value of one foreign-key column.
///
/// Built once at load time so repeated joins on the same column are map
/// lookups instead of table scans. Row IDs inside a group keep file order;
/// rows with an empty key are not indexed.
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyIndex {
    groups: IndexMap<String, Vec<String>>,
}

impl ForeignKeyIndex {
    /// Indexes `table` on `column`.
    pub fn build(table: &Table, column: usize) -> Self {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        for (id, fields) in table.iter() {
            match fields.get(column) {
                Some(key) if !key.is_empty() => {
                    groups.entry(key.clone()).or_default().push(id.to_string());
                }
                _ => {}
            }
        }
        Self { groups }
    }

    /// Row IDs whose key equals `key`, in file order; empty when none.
    pub fn get(&self, key: &str) -> &[String] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }
}
