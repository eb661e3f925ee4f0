//! Export sinks, tabular layout and the timeline plot.

mod csv;
pub mod plot;
pub mod progress;
mod types;
mod writer;
mod xlsx;

pub use csv::CsvSink;
pub use types::{Cell, Sheet, SheetRow, sanitize_sheet_name, sheets_for};
pub use writer::ExportSink;
pub use xlsx::XlsxSink;
