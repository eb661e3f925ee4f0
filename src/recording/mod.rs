//! Recording file access.
//!
//! The pipeline only sees recordings through [`RecordingReader`]; the EDF
//! implementation lives in [`edf`].

pub mod edf;

use crate::error::Result;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use edf::EdfReader;

/// Opens a recording file and exposes its metadata and annotations.
pub trait RecordingReader {
    /// Open the recording at `path`, decoding annotation text with `encoding`.
    fn open(&self, path: &Path, encoding: TextEncoding) -> Result<RecordingHandle>;
}

/// Text encoding used for annotation descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1, one byte per character.
    #[default]
    Latin1,
    /// UTF-8, invalid sequences replaced.
    Utf8,
}

impl TextEncoding {
    /// Decode raw annotation bytes.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latin1 => write!(f, "latin1"),
            Self::Utf8 => write!(f, "utf8"),
        }
    }
}

/// One raw annotation as reported by the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationEvent {
    /// Offset from recording start in seconds.
    pub onset: f64,
    /// Duration in seconds (0 when the recording gives none).
    pub duration: f64,
    /// Free-text description.
    pub description: String,
}

/// An opened recording.
///
/// Metadata the file failed to provide is `None`; extraction decides
/// whether that is fatal.
#[derive(Debug, Clone)]
pub struct RecordingHandle {
    /// Path the recording was opened from.
    pub source_path: PathBuf,
    /// Recording start as reported by the file.
    pub meas_start: Option<DateTime<FixedOffset>>,
    /// Number of samples per channel.
    pub n_samples: Option<u64>,
    /// Sampling rate in Hz.
    pub sampling_rate: Option<f64>,
    /// Annotation events in file order.
    pub annotation_events: Vec<AnnotationEvent>,
}
