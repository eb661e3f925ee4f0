//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "edfaudit";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default recording file extension (without the dot).
pub const DEFAULT_EXTENSION: &str = "edf";

/// Default timeline density in synthetic points per second.
pub const DEFAULT_TIMELINE_RATE: f64 = 10.0;

/// Default number of successful files between running exports.
pub const DEFAULT_EXPORT_EVERY: usize = 1;

/// Output file name suffixes, appended to the root folder name.
pub mod output_suffixes {
    /// Annotations workbook.
    pub const ANNOTATIONS: &str = "_annotations";
    /// Timings workbook.
    pub const TIMINGS: &str = "_timings";
    /// Timeline plot page.
    pub const TIMELINE: &str = "_guntt.html";
}

/// Spreadsheet sheet naming rules.
pub mod sheet {
    /// Maximum sheet name length accepted by Excel.
    pub const MAX_NAME_LEN: usize = 31;
    /// Characters Excel refuses in sheet names.
    pub const FORBIDDEN_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];
    /// Name used when sanitizing leaves nothing.
    pub const FALLBACK_NAME: &str = "Sheet";
    /// Excel number format for timestamps.
    pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss.000";
}

/// EDF/EDF+ header layout.
pub mod edf {
    /// Size of the fixed part of the header in bytes.
    pub const FIXED_HEADER_LEN: usize = 256;
    /// Size of one signal's header block in bytes.
    pub const SIGNAL_HEADER_LEN: usize = 256;
    /// Bytes per stored sample (16-bit little endian).
    pub const BYTES_PER_SAMPLE: usize = 2;
    /// Label of the EDF+ annotation signal.
    pub const ANNOTATION_LABEL: &str = "EDF Annotations";
    /// Two-digit years at or above this value belong to the 1900s.
    pub const CENTURY_PIVOT: u32 = 85;
    /// TAL separator between onset and duration.
    pub const TAL_DURATION_SEP: u8 = 0x15;
    /// TAL separator between annotation fields.
    pub const TAL_FIELD_SEP: u8 = 0x14;
    /// TAL terminator.
    pub const TAL_END: u8 = 0x00;
}

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Timeline plot dimensions in pixels.
pub mod plot {
    /// Plot width.
    pub const WIDTH: u32 = 900;
    /// Plot height.
    pub const HEIGHT: u32 = 200;
    /// Point radius.
    pub const POINT_SIZE: u32 = 2;
}
