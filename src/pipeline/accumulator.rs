//! Batch-wide accumulation of extracted rows.

use super::extract::{AnnotationRow, TimingRow};

/// Append-only, insertion-ordered table of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    /// Empty table.
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub(crate) fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    pub(crate) fn extend(&mut self, rows: impl IntoIterator<Item = R>) {
        self.rows.extend(rows);
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// All annotations of a batch, in file-processing then event order.
pub type AnnotationTable = Table<AnnotationRow>;

/// One interval per successfully processed recording.
pub type TimingTable = Table<TimingRow>;

/// Running tables for one batch run.
///
/// Rows can only be appended; a file that fails never reaches an append.
#[derive(Debug, Default)]
pub struct Accumulator {
    annotations: AnnotationTable,
    timings: TimingTable,
}

impl Accumulator {
    /// Fresh accumulator for a new batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's annotation rows.
    pub fn append_annotations(&mut self, fragment: Vec<AnnotationRow>) {
        self.annotations.extend(fragment);
    }

    /// Append one file's timing row.
    pub fn append_timing(&mut self, row: TimingRow) {
        self.timings.push(row);
    }

    /// Annotations accumulated so far.
    pub fn annotations(&self) -> &AnnotationTable {
        &self.annotations
    }

    /// Timings accumulated so far.
    pub fn timings(&self) -> &TimingTable {
        &self.timings
    }

    /// Owned copy of both tables as of this call.
    pub fn snapshot(&self) -> (AnnotationTable, TimingTable) {
        (self.annotations.clone(), self.timings.clone())
    }

    /// Consume the accumulator, returning both tables.
    pub fn into_tables(self) -> (AnnotationTable, TimingTable) {
        (self.annotations, self.timings)
    }
}
