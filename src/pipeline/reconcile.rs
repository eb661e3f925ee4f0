//! Splitting accumulated tables by source folder.

use super::accumulator::Table;
use super::extract::{AnnotationRow, TimingRow};
use std::collections::BTreeMap;

/// Rows that know which folder they came from.
pub trait FolderTagged {
    /// Name of the directory containing the source file.
    fn folder_name(&self) -> &str;
}

impl FolderTagged for AnnotationRow {
    fn folder_name(&self) -> &str {
        &self.folder_name
    }
}

impl FolderTagged for TimingRow {
    fn folder_name(&self) -> &str {
        &self.folder_name
    }
}

/// Per-folder partition of a table, keyed and ordered by folder name.
pub type FolderGroup<R> = BTreeMap<String, Table<R>>;

/// Partition `table` by folder, keeping insertion order within each part.
pub fn split_by_folder<R: FolderTagged + Clone>(table: &Table<R>) -> FolderGroup<R> {
    let mut groups: FolderGroup<R> = BTreeMap::new();
    for row in table {
        groups
            .entry(row.folder_name().to_string())
            .or_default()
            .push(row.clone());
    }
    groups
}
