//! Interactive root folder prompt.

use crate::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Ask for the root folder on `output` and read one line from `input`.
///
/// Returns `None` on an empty answer or end of input. Surrounding quotes,
/// as left by drag-and-drop into a terminal, are stripped.
pub fn prompt_for_root(mut input: impl BufRead, mut output: impl Write) -> Result<Option<PathBuf>> {
    write!(output, "Root folder to scan: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let answer = line.trim();
    let answer = answer
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| answer.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(answer)
        .trim();

    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(answer)))
    }
}
