//! Configuration type definitions.

use crate::constants::{DEFAULT_EXPORT_EVERY, DEFAULT_EXTENSION, DEFAULT_TIMELINE_RATE};
use crate::recording::TextEncoding;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default audit settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default audit settings, overridden by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Recording file extension, without the dot.
    pub extension: String,

    /// Encoding of annotation text in recordings.
    pub encoding: TextEncoding,

    /// Timeline density in points per second.
    pub timeline_rate: f64,

    /// Successful files between running exports.
    pub export_every: usize,

    /// Workbook format.
    pub format: OutputFormat,

    /// Label for the running annotation sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,

    /// Whether to write the timeline plot.
    pub plot: bool,

    /// Prefix CSV files with a UTF-8 byte order mark.
    pub csv_bom: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            encoding: TextEncoding::default(),
            timeline_rate: DEFAULT_TIMELINE_RATE,
            export_every: DEFAULT_EXPORT_EVERY,
            format: OutputFormat::default(),
            sheet_name: None,
            plot: true,
            csv_bom: true,
        }
    }
}

/// Supported workbook formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook, one worksheet per sheet.
    #[default]
    Xlsx,
    /// One CSV file per sheet.
    Csv,
}

impl OutputFormat {
    /// File extension used for output names.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
