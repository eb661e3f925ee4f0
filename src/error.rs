//! Error types for edfaudit.

use std::path::PathBuf;

/// Result type alias for edfaudit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for edfaudit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Root directory does not exist.
    #[error("root directory does not exist: {path}")]
    RootNotFound {
        /// The missing root path.
        path: PathBuf,
    },

    /// Root path exists but is not a directory.
    #[error("root path is not a directory: {path}")]
    RootNotDirectory {
        /// The offending root path.
        path: PathBuf,
    },

    /// Discovery finished without finding a single recording.
    #[error("no '.{extension}' recording files found under {path}")]
    NoRecordingFiles {
        /// Root directory that was searched.
        path: PathBuf,
        /// Extension that was searched for.
        extension: String,
    },

    /// Recording file could not be read.
    #[error("failed to open recording '{path}'")]
    RecordingOpen {
        /// Path to the recording.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Recording file is malformed or in an unsupported format.
    #[error("invalid recording '{path}': {reason}")]
    InvalidRecording {
        /// Path to the recording.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// A required metadata field is missing from an opened recording.
    #[error("recording '{path}' has no {field}")]
    MissingMetadata {
        /// Path to the recording.
        path: PathBuf,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Sampling rate is zero, negative or not a number.
    #[error("recording '{path}' has invalid sampling rate {value}")]
    InvalidSamplingRate {
        /// Path to the recording.
        path: PathBuf,
        /// The reported sampling rate.
        value: f64,
    },

    /// Computed end time does not fit the calendar range.
    #[error("recording '{path}' end time is out of range")]
    TimeOutOfRange {
        /// Path to the recording.
        path: PathBuf,
    },

    /// Failed to write an output workbook.
    #[error("failed to write workbook '{path}'")]
    Export {
        /// Path to the workbook.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to render the timeline plot.
    #[error("failed to render timeline: {reason}")]
    Render {
        /// Description of the rendering failure.
        reason: String,
    },
}

impl Error {
    /// Wrap any sink error as an export failure for `path`.
    pub fn export(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Export {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Render an error and its chain of causes as `outer: cause: root cause`.
pub fn display_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
