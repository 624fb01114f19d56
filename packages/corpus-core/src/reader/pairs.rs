//! Lazy per-entry cross joins.
//!
//! The iterators compose entry IDs -> left values -> right values. For each
//! entry every left value is paired with every right value of the same entry
//! (a Cartesian product, not a zip): two heads and three translations give
//! six pairs. Iterators borrow the reader, are `Clone`, and a fresh call on
//! the reader restarts the sequence.

use std::slice;

use indexmap::{IndexMap, IndexSet};

use crate::annotation_cache::AnnotationCache;

/// Lazy sequence of entry IDs belonging to one section, in entry table order.
#[derive(Debug, Clone)]
pub struct EntryIds<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> EntryIds<'a> {
    pub(crate) fn new(ids: &'a [String]) -> Self {
        Self { inner: ids.iter() }
    }
}

impl<'a> Iterator for EntryIds<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for EntryIds<'_> {}

/// Where the left-hand values of a join come from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum JoinLeft<'a> {
    /// Every value of an annotation kind
    Annotation(&'a str),
    /// The single resolved concept of a wordlist entry
    Concept(&'a IndexMap<String, String>),
}

impl<'a> JoinLeft<'a> {
    fn values(self, cache: &'a AnnotationCache, entry_id: &str) -> LeftValues<'a> {
        match self {
            JoinLeft::Annotation(kind) => LeftValues::Set(cache.set_or_empty(entry_id, kind).iter()),
            JoinLeft::Concept(concepts) => {
                LeftValues::One(concepts.get(entry_id).map(String::as_str))
            }
        }
    }
}

#[derive(Debug, Clone)]
enum LeftValues<'a> {
    Set(indexmap::set::Iter<'a, String>),
    One(Option<&'a str>),
}

impl<'a> Iterator for LeftValues<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            LeftValues::Set(iter) => iter.next().map(String::as_str),
            LeftValues::One(value) => value.take(),
        }
    }
}

/// Join state for the entry currently being expanded.
#[derive(Debug, Clone)]
struct JoinCursor<'a> {
    entry_id: &'a str,
    lefts: LeftValues<'a>,
    left: Option<&'a str>,
    rights: &'a IndexSet<String>,
    right_iter: indexmap::set::Iter<'a, String>,
}

impl<'a> JoinCursor<'a> {
    fn new(entry_id: &'a str, lefts: LeftValues<'a>, rights: &'a IndexSet<String>) -> Self {
        Self {
            entry_id,
            lefts,
            left: None,
            rights,
            right_iter: rights.iter(),
        }
    }

    fn next(&mut self) -> Option<(&'a str, &'a str, &'a str)> {
        loop {
            if let Some(left) = self.left {
                if let Some(right) = self.right_iter.next() {
                    return Some((self.entry_id, left, right.as_str()));
                }
            }
            self.left = Some(self.lefts.next()?);
            self.right_iter = self.rights.iter();
        }
    }
}

/// Lazy `(entry_id, left, right)` triples over the entries of one section.
#[derive(Debug, Clone)]
pub struct CrossJoin<'a> {
    entries: slice::Iter<'a, String>,
    cache: &'a AnnotationCache,
    left: JoinLeft<'a>,
    right_kind: &'a str,
    cursor: Option<JoinCursor<'a>>,
}

impl<'a> CrossJoin<'a> {
    pub(crate) fn new(
        entries: &'a [String],
        cache: &'a AnnotationCache,
        left: JoinLeft<'a>,
        right_kind: &'a str,
    ) -> Self {
        Self {
            entries: entries.iter(),
            cache,
            left,
            right_kind,
            cursor: None,
        }
    }

    /// Drops the entry IDs, yielding `(left, right)` pairs.
    pub fn pairs(self) -> Pairs<'a> {
        Pairs { inner: self }
    }
}

impl<'a> Iterator for CrossJoin<'a> {
    type Item = (&'a str, &'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cursor) = self.cursor.as_mut() {
                if let Some(triple) = cursor.next() {
                    return Some(triple);
                }
                self.cursor = None;
            }
            let entry_id = self.entries.next()?;
            let lefts = self.left.values(self.cache, entry_id);
            let rights = self.cache.set_or_empty(entry_id, self.right_kind);
            self.cursor = Some(JoinCursor::new(entry_id, lefts, rights));
        }
    }
}

/// Lazy `(left, right)` pairs, e.g. `(head, translation)`.
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    inner: CrossJoin<'a>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, left, right)| (left, right))
    }
}
