//! Export sink trait definition.

use crate::error::Result;
use crate::output::Sheet;
use std::path::Path;

/// Destination for tabular output.
pub trait ExportSink {
    /// Create or fully overwrite the workbook at `path` with `sheets`.
    ///
    /// Called repeatedly against the same path within one run.
    fn write_workbook(&mut self, path: &Path, sheets: &[Sheet]) -> Result<()>;
}
