//! Per-entry annotation cache.
//!
//! Turns the annotation table into `entry_id -> kind -> {values}` with one
//! scan at load time, so that "all heads of entry X" is a map lookup rather
//! than a pass over every annotation row.

use indexmap::{IndexMap, IndexSet};

use crate::error::CorpusError;
use crate::table::schema::annotation;
use crate::table::Table;

/// Distinct annotation payloads of one entry, keyed by annotation kind.
pub type KindSets = IndexMap<String, IndexSet<String>>;

/// Annotation cache for one entry table.
///
/// Every loaded entry has a slot, even when it has no annotations, so a
/// lookup for a known entry never fails. Values keep first-seen order and
/// repeated payloads of the same kind collapse.
#[derive(Debug, Clone, Default)]
pub struct AnnotationCache {
    entry_table: &'static str,
    entries: IndexMap<String, KindSets>,
    empty: IndexSet<String>,
    orphans: usize,
}

impl AnnotationCache {
    /// Builds the cache from an entry table and its annotation table.
    ///
    /// Annotations pointing at an entry that was not loaded are left out of
    /// the cache and counted as orphans.
    pub fn build(entries: &Table, annotations: &Table) -> Self {
        let mut slots: IndexMap<String, KindSets> = entries
            .ids()
            .map(|entry_id| (entry_id.to_string(), KindSets::new()))
            .collect();

        let mut orphans = 0usize;
        for (annotation_id, fields) in annotations.iter() {
            let entry_id = fields[annotation::ENTRY_ID].as_str();
            let Some(kinds) = slots.get_mut(entry_id) else {
                tracing::warn!(
                    "Annotation {} in {} references unknown entry {}",
                    annotation_id,
                    annotations.name(),
                    entry_id
                );
                orphans += 1;
                continue;
            };
            let kind = &fields[annotation::VALUE];
            let value = &fields[annotation::STRING];
            match kinds.get_mut(kind.as_str()) {
                Some(values) => {
                    values.insert(value.clone());
                }
                None => {
                    kinds.insert(kind.clone(), IndexSet::from([value.clone()]));
                }
            }
        }

        tracing::debug!(
            "Cached annotations of {} {} rows ({} orphaned annotations)",
            slots.len(),
            entries.name(),
            orphans
        );
        Self {
            entry_table: entries.name(),
            entries: slots,
            empty: IndexSet::new(),
            orphans,
        }
    }

    /// Values of kind `kind` recorded for `entry_id`.
    ///
    /// # Returns
    /// An empty iterator when the entry has no values of that kind;
    /// `DanglingReference` when `entry_id` is not a loaded entry.
    pub fn values(&self, entry_id: &str, kind: &str) -> Result<AnnotationValues<'_>, CorpusError> {
        self.set(entry_id, kind).map(AnnotationValues::new)
    }

    /// The value set of kind `kind` for `entry_id`.
    pub fn set(&self, entry_id: &str, kind: &str) -> Result<&IndexSet<String>, CorpusError> {
        let kinds = self
            .entries
            .get(entry_id)
            .ok_or_else(|| CorpusError::dangling(self.entry_table, "id", entry_id))?;
        Ok(kinds.get(kind).unwrap_or(&self.empty))
    }

    /// Same as [`set`](Self::set) for entry IDs already known to be loaded.
    pub(crate) fn set_or_empty(&self, entry_id: &str, kind: &str) -> &IndexSet<String> {
        self.entries
            .get(entry_id)
            .and_then(|kinds| kinds.get(kind))
            .unwrap_or(&self.empty)
    }

    /// Annotation kinds recorded for `entry_id`, in first-seen order.
    pub fn kinds(&self, entry_id: &str) -> Result<impl Iterator<Item = &str> + '_, CorpusError> {
        let kinds = self
            .entries
            .get(entry_id)
            .ok_or_else(|| CorpusError::dangling(self.entry_table, "id", entry_id))?;
        Ok(kinds.keys().map(String::as_str))
    }

    /// Number of entries with a cache slot.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of annotations whose entry was not loaded.
    pub fn orphan_count(&self) -> usize {
        self.orphans
    }
}

/// Lazy sequence over the values of one `(entry, kind)` slot.
#[derive(Debug, Clone)]
pub struct AnnotationValues<'a> {
    inner: indexmap::set::Iter<'a, String>,
}

impl<'a> AnnotationValues<'a> {
    pub(crate) fn new(set: &'a IndexSet<String>) -> Self {
        Self { inner: set.iter() }
    }
}

impl<'a> Iterator for AnnotationValues<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for AnnotationValues<'_> {}
