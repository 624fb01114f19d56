//! Load report: what construction loaded, skipped and could not attach.

use std::fmt;

use serde::Serialize;

use crate::table::Table;

/// Row counts of one loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    pub rows: usize,
    pub malformed: usize,
    pub duplicate_ids: usize,
}

impl TableReport {
    pub fn of(table: &Table) -> Self {
        Self {
            table: table.name().to_string(),
            rows: table.len(),
            malformed: table.malformed_rows().len(),
            duplicate_ids: table.duplicate_ids(),
        }
    }
}

/// Summary of one reader construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Per-table counts in load order
    pub tables: Vec<TableReport>,
    /// Annotations whose entry was not loaded
    pub orphan_annotations: usize,
}

impl LoadReport {
    pub(crate) fn record(&mut self, table: &Table) {
        self.tables.push(TableReport::of(table));
    }

    /// Counts for `table`, if it was loaded.
    pub fn table(&self, table: &str) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == table)
    }

    /// Malformed rows skipped across all tables.
    pub fn malformed_total(&self) -> usize {
        self.tables.iter().map(|report| report.malformed).sum()
    }

    /// Rows loaded across all tables.
    pub fn rows_total(&self) -> usize {
        self.tables.iter().map(|report| report.rows).sum()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows loaded from {} tables, {} malformed rows skipped, {} orphaned annotations",
            self.rows_total(),
            self.tables.len(),
            self.malformed_total(),
            self.orphan_annotations
        )
    }
}
