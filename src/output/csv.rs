//! CSV output, one file per sheet.

use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::output::{Cell, ExportSink, Sheet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes each sheet of a workbook to `<stem>_<sheet>.csv` beside `path`.
#[derive(Debug)]
pub struct CsvSink {
    bom: bool,
}

impl CsvSink {
    /// Create a CSV sink, optionally prefixing files with a UTF-8 BOM.
    pub fn new(bom: bool) -> Self {
        Self { bom }
    }

    /// File written for `sheet_name` of the workbook at `path`.
    pub fn sheet_path(path: &Path, sheet_name: &str) -> PathBuf {
        let stem = path.file_stem().map_or_else(
            || std::borrow::Cow::Borrowed("output"),
            |s| s.to_string_lossy(),
        );
        path.with_file_name(format!("{stem}_{}.csv", file_safe(sheet_name)))
    }

    fn write_sheet(&self, path: &Path, sheet: &Sheet) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        if self.bom {
            file.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(&sheet.headers)
            .map_err(|e| Error::export(path, e))?;
        for row in &sheet.rows {
            writer
                .write_record(row.iter().map(Cell::to_text))
                .map_err(|e| Error::export(path, e))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Replace characters that common filesystems refuse in file names.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

impl Default for CsvSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExportSink for CsvSink {
    fn write_workbook(&mut self, path: &Path, sheets: &[Sheet]) -> Result<()> {
        for sheet in sheets {
            let sheet_path = Self::sheet_path(path, &sheet.name);
            self.write_sheet(&sheet_path, sheet).map_err(|e| match e {
                Error::Io(io) => Error::export(&sheet_path, io),
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sheet(name: &str) -> Sheet {
        Sheet {
            name: name.to_string(),
            headers: vec!["onset", "description"],
            rows: vec![
                vec![Cell::Number(1.0), Cell::Text("with,comma".to_string())],
                vec![Cell::Number(2.5), Cell::Empty],
            ],
        }
    }

    #[test]
    fn test_sheet_path() {
        let path = CsvSink::sheet_path(Path::new("/out/root_annotations.csv"), "p1");
        assert_eq!(path, PathBuf::from("/out/root_annotations_p1.csv"));
    }

    #[test]
    fn test_sheet_path_replaces_invalid_file_name_chars() {
        let path = CsvSink::sheet_path(Path::new("/out/root_timings.csv"), "a<b>|\"c\"");
        assert_eq!(path, PathBuf::from("/out/root_timings_a_b___c_.csv"));
    }

    #[test]
    fn test_writes_bom_and_quotes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("root_annotations.csv");

        CsvSink::new(true)
            .write_workbook(&path, &[sheet("p1")])
            .unwrap();

        let bytes = std::fs::read(dir.path().join("root_annotations_p1.csv")).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(text, "onset,description\n1,\"with,comma\"\n2.5,\n");
    }

    #[test]
    fn test_without_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.csv");

        CsvSink::new(false)
            .write_workbook(&path, &[sheet("a"), sheet("b")])
            .unwrap();

        let bytes = std::fs::read(dir.path().join("t_b.csv")).unwrap();
        assert!(bytes.starts_with(b"onset"));
        assert!(dir.path().join("t_a.csv").exists());
    }
}
