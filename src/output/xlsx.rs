//! Excel workbook output.

use crate::constants::sheet::DATETIME_FORMAT;
use crate::error::{Error, Result};
use crate::output::{Cell, ExportSink, Sheet};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

/// Writes `.xlsx` workbooks, one worksheet per sheet.
#[derive(Debug, Default)]
pub struct XlsxSink;

impl XlsxSink {
    /// Create a new xlsx sink.
    pub fn new() -> Self {
        Self
    }
}

impl ExportSink for XlsxSink {
    fn write_workbook(&mut self, path: &Path, sheets: &[Sheet]) -> Result<()> {
        build_workbook(sheets)
            .and_then(|mut workbook| workbook.save(path))
            .map_err(|e| Error::export(path, e))
    }
}

fn build_workbook(sheets: &[Sheet]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, header) in (0u16..).zip(&sheet.headers) {
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
        }
        for (row, cells) in (1u32..).zip(&sheet.rows) {
            for (col, cell) in (0u16..).zip(cells) {
                write_cell(worksheet, row, col, cell, &datetime_format)?;
            }
        }
        worksheet.autofit();
    }

    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    datetime_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::DateTime(t) => {
            worksheet.write_datetime_with_format(row, col, t, datetime_format)?;
        }
        Cell::Empty => {}
    }
    Ok(())
}
