//! Output type definitions.

use crate::constants::sheet::{FALLBACK_NAME, FORBIDDEN_CHARS, MAX_NAME_LEN};
use crate::pipeline::{AnnotationRow, Table, TimingRow};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
    /// No value.
    Empty,
}

impl Cell {
    /// Plain-text rendering, used by text-based sinks.
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::DateTime(t) => t.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// Rows that can be laid out as spreadsheet lines.
pub trait SheetRow {
    /// Column headers.
    const HEADERS: &'static [&'static str];

    /// Cells of this row, one per header.
    fn cells(&self) -> Vec<Cell>;
}

impl SheetRow for AnnotationRow {
    const HEADERS: &'static [&'static str] = &[
        "onset",
        "onset_time",
        "duration",
        "description",
        "fname",
        "folder_name",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Number(self.onset),
            self.onset_time.map_or(Cell::Empty, Cell::DateTime),
            Cell::Number(self.duration),
            Cell::Text(self.description.clone()),
            Cell::Text(self.fname.clone()),
            Cell::Text(self.folder_name.clone()),
        ]
    }
}

impl SheetRow for TimingRow {
    const HEADERS: &'static [&'static str] =
        &["start_time", "end_time", "duration_s", "fname", "folder_name"];

    fn cells(&self) -> Vec<Cell> {
        let duration = self.end_time - self.start_time;
        #[allow(clippy::cast_precision_loss)]
        let duration_s = duration.num_milliseconds() as f64 / 1e3;
        vec![
            Cell::DateTime(self.start_time),
            Cell::DateTime(self.end_time),
            Cell::Number(duration_s),
            Cell::Text(self.fname.clone()),
            Cell::Text(self.folder_name.clone()),
        ]
    }
}

/// One named worksheet's worth of data.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Sheet name, already valid for spreadsheets.
    pub name: String,
    /// Column headers.
    pub headers: Vec<&'static str>,
    /// Data rows.
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Lay out a table under a (sanitized) sheet name.
    pub fn from_table<R: SheetRow>(name: &str, table: &Table<R>) -> Self {
        Self {
            name: sanitize_sheet_name(name),
            headers: R::HEADERS.to_vec(),
            rows: table.iter().map(SheetRow::cells).collect(),
        }
    }
}

/// Build one sheet per named table, keeping names unique within the workbook.
pub fn sheets_for<'a, R: SheetRow + 'a>(
    tables: impl IntoIterator<Item = (&'a String, &'a Table<R>)>,
) -> Vec<Sheet> {
    let mut taken = HashSet::new();
    tables
        .into_iter()
        .map(|(name, table)| {
            let mut sheet = Sheet::from_table(name, table);
            sheet.name = unique_name(&sheet.name, &mut taken);
            sheet
        })
        .collect()
}

/// Make `name` acceptable as a worksheet name.
///
/// Forbidden characters become `_` and the result is cut to the maximum
/// length. Apostrophes and whitespace are stripped from both ends after the
/// cut, since a worksheet name may not start or end with `'`. Never empty.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cut: String = cleaned.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = cut.trim_matches(|c: char| c == '\'' || c.is_whitespace());

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Suffix `name` until it is unique (case-insensitively) among `taken`.
fn unique_name(name: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    let mut n = 2;
    while taken.contains(&candidate.to_lowercase()) {
        let suffix = format!("_{n}");
        let keep = MAX_NAME_LEN.saturating_sub(suffix.chars().count());
        let prefix: String = name.chars().take(keep).collect();
        candidate = sanitize_sheet_name(&prefix) + &suffix;
        n += 1;
    }
    taken.insert(candidate.to_lowercase());
    candidate
}
